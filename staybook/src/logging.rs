//! Logging infrastructure for the staybook library.
//!
//! Library code logs through the `log` facade. [`Logger`] is the stderr
//! backend the CLI installs, with three verbosity levels chosen by flags or
//! the `STAYBOOK_LOG_MODE` environment variable.

use std::env;
use std::fmt;

/// Environment variable selecting the log level.
pub const LOG_MODE_ENV: &str = "STAYBOOK_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// # Examples
///
/// ```
/// use staybook::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all non-essential output.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, info and debug messages.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses "quiet", "normal" or "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` filter equivalent to this level.
    #[must_use]
    pub const fn filter(self) -> log::LevelFilter {
        match self {
            Self::Quiet => log::LevelFilter::Off,
            Self::Normal => log::LevelFilter::Warn,
            Self::Verbose => log::LevelFilter::Debug,
        }
    }
}

/// A stderr logger.
///
/// Used directly through its methods, or installed as the global `log`
/// backend with [`Logger::install`].
///
/// # Examples
///
/// ```
/// use staybook::{LogLevel, Logger};
///
/// let logger = Logger::new(LogLevel::Normal);
/// logger.error("this is printed");
/// logger.info("this is not (requires verbose)");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger with the given level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Installs this logger as the global `log` backend.
    ///
    /// # Errors
    ///
    /// Fails if a global logger was already installed.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(self.level.filter());
        Ok(())
    }

    /// Logs an error message, unless quiet.
    pub fn error(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("ERROR: {message}");
        }
    }

    /// Logs a warning message, unless quiet.
    pub fn warn(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("WARN: {message}");
        }
    }

    /// Logs an informational message at verbose level.
    pub fn info(&self, message: &str) {
        if self.level >= LogLevel::Verbose {
            eprintln!("INFO: {message}");
        }
    }

    /// Logs a debug message at verbose level.
    pub fn debug(&self, message: &str) {
        if self.level >= LogLevel::Verbose {
            eprintln!("DEBUG: {message}");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        match record.level() {
            log::Level::Error => self.error(&message),
            log::Level::Warn => self.warn(&message),
            log::Level::Info => self.info(&message),
            log::Level::Debug | log::Level::Trace => self.debug(&message),
        }
    }

    fn flush(&self) {}
}

/// Builds a logger from CLI flags and the environment.
///
/// Precedence: `verbose`, then `quiet`, then `STAYBOOK_LOG_MODE`, then
/// [`LogLevel::Normal`].
///
/// # Examples
///
/// ```
/// use staybook::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    if let Ok(env_value) = env::var(LOG_MODE_ENV) {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return Logger::new(level);
        }
    }

    Logger::new(LogLevel::Normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use serial_test::serial;

    struct EnvRestore(Option<String>);

    impl EnvRestore {
        fn capture() -> Self {
            Self(env::var(LOG_MODE_ENV).ok())
        }
    }

    impl Drop for EnvRestore {
        fn drop(&mut self) {
            match self.0.take() {
                Some(val) => env::set_var(LOG_MODE_ENV, val),
                None => env::remove_var(LOG_MODE_ENV),
            }
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Quiet), "quiet");
        assert_eq!(format!("{}", LogLevel::Normal), "normal");
        assert_eq!(format!("{}", LogLevel::Verbose), "verbose");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("QUIET").unwrap(), LogLevel::Quiet);
        assert_eq!(LogLevel::parse("Normal").unwrap(), LogLevel::Normal);
        assert_eq!(LogLevel::parse("verbose").unwrap(), LogLevel::Verbose);
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_level_filters() {
        assert_eq!(LogLevel::Quiet.filter(), log::LevelFilter::Off);
        assert_eq!(LogLevel::Normal.filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Verbose.filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_logger_enabled() {
        let normal = Logger::new(LogLevel::Normal);
        let meta = |level| log::Metadata::builder().level(level).build();
        assert!(normal.enabled(&meta(log::Level::Error)));
        assert!(normal.enabled(&meta(log::Level::Warn)));
        assert!(!normal.enabled(&meta(log::Level::Info)));

        let verbose = Logger::new(LogLevel::Verbose);
        assert!(verbose.enabled(&meta(log::Level::Debug)));
        assert!(!verbose.enabled(&meta(log::Level::Trace)));

        let quiet = Logger::new(LogLevel::Quiet);
        assert!(!quiet.enabled(&meta(log::Level::Error)));
    }

    #[test]
    fn test_logger_default() {
        assert_eq!(Logger::default().level(), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_init_logger_defaults() {
        let _restore = EnvRestore::capture();
        env::remove_var(LOG_MODE_ENV);
        assert_eq!(init_logger(false, false).level(), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_init_logger_from_env() {
        let _restore = EnvRestore::capture();

        env::set_var(LOG_MODE_ENV, "verbose");
        assert_eq!(init_logger(false, false).level(), LogLevel::Verbose);

        env::set_var(LOG_MODE_ENV, "quiet");
        assert_eq!(init_logger(false, false).level(), LogLevel::Quiet);

        env::set_var(LOG_MODE_ENV, "invalid");
        assert_eq!(init_logger(false, false).level(), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_init_logger_cli_overrides_env() {
        let _restore = EnvRestore::capture();
        env::set_var(LOG_MODE_ENV, "quiet");
        assert_eq!(init_logger(true, false).level(), LogLevel::Verbose);
    }
}
