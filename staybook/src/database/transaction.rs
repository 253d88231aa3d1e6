//! Transaction management utilities.

use rusqlite::{Transaction, TransactionBehavior};

use crate::error::Result;

use super::connection::Database;

impl Database {
    /// Runs `f` inside a `BEGIN IMMEDIATE` transaction.
    ///
    /// The write lock is taken before `f` reads anything, so a
    /// read-check-write sequence inside `f` cannot interleave with another
    /// writer on the same file. The transaction commits if `f` returns `Ok`
    /// and rolls back otherwise.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or [`crate::Error::Unavailable`] if the
    /// write lock is not granted within the busy timeout.
    pub fn immediate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self.connection();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
