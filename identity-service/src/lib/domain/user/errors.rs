use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error raised by a user directory backend
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid user record: {0}")]
    InvalidRecord(String),

    #[error("Corrupt user record: {0}")]
    CorruptRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<EmailError> for DirectoryError {
    fn from(err: EmailError) -> Self {
        DirectoryError::CorruptRecord(err.to_string())
    }
}

/// Top-level error for user profile operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),
}
