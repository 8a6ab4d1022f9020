#[derive(Debug, thiserror::Error)]
pub enum PatientError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("patient '{id}' not found")]
    NotFound { id: String, known_ids: Vec<String> },
    #[error("patient '{0}' already exists")]
    DuplicateKey(String),
    #[error("invalid sort field '{0}' (expected one of: height, weight, bmi)")]
    InvalidField(String),
    #[error("invalid sort order '{0}' (expected asc or desc)")]
    InvalidOrder(String),

    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to read patient file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write patient file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize patients: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patients: {0}")]
    Deserialization(serde_json::Error),
    #[error("stored record '{id}' is invalid: {source}")]
    InvalidStoredRecord {
        id: String,
        #[source]
        source: Box<PatientError>,
    },
    #[error("patient store lock poisoned")]
    LockPoisoned,
}

impl PatientError {
    /// Shorthand for a [`PatientError::Validation`] on `field`.
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        PatientError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's request rather than by storage.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PatientError::Validation { .. }
                | PatientError::NotFound { .. }
                | PatientError::DuplicateKey(_)
                | PatientError::InvalidField(_)
                | PatientError::InvalidOrder(_)
        )
    }
}

pub type PatientResult<T> = std::result::Result<T, PatientError>;
