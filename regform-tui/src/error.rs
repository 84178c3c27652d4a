use thiserror::Error;

/// Errors that end the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Terminal or log file I/O failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
