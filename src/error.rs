use thiserror::Error;

/// Domain failures that are worth matching on. I/O and parse failures are
/// carried as `anyhow` context instead.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}
