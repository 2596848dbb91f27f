use thiserror::Error;

/// Failures of the persistence capability
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The backing store refused the operation (quota, private mode, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Actions rejected locally before any request is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please add at least one symptom")]
    NoSymptoms,
}
