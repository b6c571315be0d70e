use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::session::errors::HasherError;
use crate::domain::session::ports::CredentialHasher;

/// Argon2id adapter for the credential hasher port.
///
/// Verification is CPU bound, so it runs on the blocking thread pool.
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    hasher: Arc<auth::PasswordHasher>,
}

impl Argon2CredentialHasher {
    pub fn new(hasher: auth::PasswordHasher) -> Self {
        Self {
            hasher: Arc::new(hasher),
        }
    }

    /// Hash a plaintext password for storage.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing primitive failed
    pub fn hash(&self, plaintext: &str) -> Result<String, HasherError> {
        self.hasher
            .hash(plaintext)
            .map_err(|e| HasherError::HashingFailed(e.to_string()))
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, HasherError> {
        let hasher = Arc::clone(&self.hasher);
        let plaintext = plaintext.to_owned();
        let stored_hash = stored_hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &stored_hash))
            .await
            .map_err(|e| HasherError::TaskFailed(e.to_string()))?
            .map_err(|e| HasherError::VerificationFailed(e.to_string()))
    }
}
