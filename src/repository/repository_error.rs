/// Failures surfaced by a [`Repository`](crate::repository::Repository).
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A unique index rejected the write.
    #[error("Already Exists: {0}")]
    AlreadyExists(String),

    /// The store refused a value (failed cast, invalid argument).
    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Database Error: {0}")]
    DatabaseError(String),

    #[error("Connection Error: {0}")]
    ConnectionError(String),

    /// A value could not be turned into BSON on its way in.
    #[error("Encoding Error: {0}")]
    EncodingError(String),

    /// A stored document could not be read back into its record type.
    #[error("Decoding Error: {0}")]
    DecodingError(String),

    #[error("Repository Error: {0}")]
    Generic(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    pub fn already_exists<T: Into<String>>(msg: T) -> Self {
        RepositoryError::AlreadyExists(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        RepositoryError::ValidationError(msg.into())
    }
}

/// E11000, raised by inserts (write error) and by find-and-modify (command error).
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == 11000,
        ErrorKind::Command(e) => e.code == 11000,
        _ => err.to_string().contains("E11000"),
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        if is_duplicate_key(&err) {
            return RepositoryError::AlreadyExists(format!("Duplicate key: {}", err));
        }

        match err.kind.as_ref() {
            ErrorKind::Write(_) => RepositoryError::DatabaseError(format!("Write error: {}", err)),
            ErrorKind::Authentication { .. } => {
                RepositoryError::ConnectionError(format!("Authentication failed: {}", err))
            }
            ErrorKind::InvalidArgument { .. } => {
                RepositoryError::ValidationError(format!("Invalid argument: {}", err))
            }
            ErrorKind::BsonSerialization(_) => RepositoryError::EncodingError(format!("BSON error: {}", err)),
            ErrorKind::BsonDeserialization(_) => RepositoryError::DecodingError(format!("BSON error: {}", err)),
            ErrorKind::Io(_) => RepositoryError::ConnectionError(format!("IO error: {}", err)),
            _ => RepositoryError::Generic(Box::new(err)),
        }
    }
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::EncodingError(format!("BSON serialization error: {}", err))
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::DecodingError(format!("BSON deserialization error: {}", err))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
