use thiserror::Error;

/// Errors raised by the agent and by the batch driver.
///
/// Only `Parse` is fatal to a batch; every other variant is recorded against
/// the row or artifact that produced it.
#[derive(Error, Debug)]
pub enum AgentError {
    /// A row or request is missing a required field.
    #[error("{0}")]
    Validation(String),

    /// A local file could not be read.
    #[error("Error reading local file: {0}")]
    NotFound(String),

    /// The spreadsheet could not be read at all.
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(String),

    /// The remote store or the network rejected an upload.
    #[error("Failed to upload file to S3: {0}")]
    Upload(String),

    /// An upload body exceeded the configured limit.
    #[error("Payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// Missing or malformed start-up configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
