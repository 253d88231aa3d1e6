//! CLI command implementations.
//!
//! Booking lifecycle:
//! - `availability`: Check whether a property is free for a stay
//! - `quote`: Price a stay without booking it
//! - `book`: Create a pending reservation
//! - `confirm`: Confirm a pending reservation
//! - `cancel`: Cancel a reservation
//! - `payment`: Record the payment status of a reservation
//! - `show`: Show one reservation
//! - `list`: List reservations
//!
//! Housekeeping:
//! - `init`: Initialize the data directory and database
//! - `validate`: Validate a configuration file
//! - `completions`: Generate shell completion scripts

pub mod availability;
pub mod book;
pub mod cancel;
pub mod completions;
pub mod confirm;
pub mod init;
pub mod list;
pub mod payment;
pub mod quote;
pub mod show;
pub mod validate;

pub use availability::AvailabilityCommand;
pub use book::BookCommand;
pub use cancel::CancelCommand;
pub use completions::CompletionsCommand;
pub use confirm::ConfirmCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use payment::PaymentCommand;
pub use quote::QuoteCommand;
pub use show::ShowCommand;
pub use validate::ValidateCommand;
