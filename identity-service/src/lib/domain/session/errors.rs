use thiserror::Error;

use crate::user::errors::DirectoryError;

/// Error raised by a credential hasher
#[derive(Debug, Clone, Error)]
pub enum HasherError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),

    #[error("Hashing task failed: {0}")]
    TaskFailed(String),
}

/// Error raised by a token issuer or verifier
#[derive(Debug, Clone, Error)]
pub enum IssuerError {
    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}

/// Outcome of a failed authentication.
///
/// `InvalidCredentials` covers both an unknown email and a wrong password and
/// carries nothing that tells the two apart. Collaborator faults land in
/// `Unavailable` instead.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    #[error("Incorrect email or password")]
    InvalidCredentials,

    #[error("Authentication unavailable: {0}")]
    Unavailable(String),
}

impl From<DirectoryError> for AuthenticationError {
    fn from(err: DirectoryError) -> Self {
        AuthenticationError::Unavailable(format!("user directory: {}", err))
    }
}

impl From<HasherError> for AuthenticationError {
    fn from(err: HasherError) -> Self {
        AuthenticationError::Unavailable(format!("credential hasher: {}", err))
    }
}

impl From<IssuerError> for AuthenticationError {
    fn from(err: IssuerError) -> Self {
        AuthenticationError::Unavailable(format!("token issuer: {}", err))
    }
}
