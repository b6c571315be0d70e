use async_trait::async_trait;

use crate::domain::session::errors::AuthenticationError;
use crate::domain::session::errors::HasherError;
use crate::domain::session::errors::IssuerError;
use crate::domain::session::models::AuthenticatedSession;
use crate::domain::session::models::Credentials;
use crate::domain::session::models::IdentityClaim;
use crate::domain::session::models::SessionToken;

/// Port for the authentication flow.
#[async_trait]
pub trait AuthenticationServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a session.
    ///
    /// # Arguments
    /// * `credentials` - Claimed email and plaintext password
    ///
    /// # Returns
    /// Session token paired with the user's public record
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Unavailable` - A collaborator failed
    async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<AuthenticatedSession, AuthenticationError>;
}

/// One-way password verification.
#[async_trait]
pub trait CredentialHasher: Send + Sync + 'static {
    /// Check a plaintext password against a stored hash.
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is malformed or the primitive failed
    /// * `TaskFailed` - Offloaded verification did not complete
    async fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, HasherError>;
}

/// Mints session tokens.
#[async_trait]
pub trait TokenIssuer: Send + Sync + 'static {
    /// Sign an identity claim into an opaque token.
    ///
    /// # Errors
    /// * `SigningFailed` - Token could not be produced
    async fn issue(&self, claim: &IdentityClaim) -> Result<SessionToken, IssuerError>;
}

/// Validates tokens minted by a [`TokenIssuer`].
#[async_trait]
pub trait TokenVerifier: Send + Sync + 'static {
    /// Validate a token and recover the identity it is bound to.
    ///
    /// # Errors
    /// * `Expired` - Token is past its expiry
    /// * `Invalid` - Token is malformed, forged, or carries a bad subject
    async fn verify(&self, token: &str) -> Result<IdentityClaim, IssuerError>;
}
