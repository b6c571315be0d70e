use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::session::errors::AuthenticationError;
use crate::domain::session::models::AuthenticatedSession;
use crate::domain::session::models::Credentials;
use crate::domain::session::models::IdentityClaim;
use crate::domain::session::ports::AuthenticationServicePort;
use crate::domain::session::ports::CredentialHasher;
use crate::domain::session::ports::TokenIssuer;
use crate::user::ports::UserDirectory;

/// Domain service that turns credentials into a session.
///
/// Runs directory lookup, password verification and token issuance in
/// sequence. Holds no state of its own beyond shared handles to the three
/// collaborators, so one instance serves concurrent callers.
pub struct AuthenticationService<D, H, T>
where
    D: UserDirectory,
    H: CredentialHasher,
    T: TokenIssuer,
{
    directory: Arc<D>,
    hasher: Arc<H>,
    issuer: Arc<T>,
}

impl<D, H, T> AuthenticationService<D, H, T>
where
    D: UserDirectory,
    H: CredentialHasher,
    T: TokenIssuer,
{
    /// Create a new authentication service with injected collaborators.
    ///
    /// # Arguments
    /// * `directory` - User record lookup
    /// * `hasher` - Password verification primitive
    /// * `issuer` - Session token minting
    pub fn new(directory: Arc<D>, hasher: Arc<H>, issuer: Arc<T>) -> Self {
        Self {
            directory,
            hasher,
            issuer,
        }
    }
}

#[async_trait]
impl<D, H, T> AuthenticationServicePort for AuthenticationService<D, H, T>
where
    D: UserDirectory,
    H: CredentialHasher,
    T: TokenIssuer,
{
    async fn authenticate(
        &self,
        credentials: Credentials,
    ) -> Result<AuthenticatedSession, AuthenticationError> {
        let user = self
            .directory
            .find_by_email(credentials.email())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "User directory lookup failed");
                AuthenticationError::from(e)
            })?;

        let Some(user) = user else {
            tracing::info!(reason = "unknown_email", "Authentication rejected");
            return Err(AuthenticationError::InvalidCredentials);
        };

        let verified = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Password verification failed");
                AuthenticationError::from(e)
            })?;

        if !verified {
            tracing::info!(reason = "password_mismatch", "Authentication rejected");
            return Err(AuthenticationError::InvalidCredentials);
        }

        let token = self
            .issuer
            .issue(&IdentityClaim::from(&user))
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user.id, error = %e, "Token issuance failed");
                AuthenticationError::from(e)
            })?;

        tracing::info!(user_id = %user.id, "User authenticated");

        Ok(AuthenticatedSession {
            token,
            user: user.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::session::errors::HasherError;
    use crate::domain::session::errors::IssuerError;
    use crate::domain::session::models::SessionToken;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::user::errors::DirectoryError;

    mock! {
        pub TestUserDirectory {}

        #[async_trait]
        impl UserDirectory for TestUserDirectory {
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;
        }
    }

    mock! {
        pub TestCredentialHasher {}

        #[async_trait]
        impl CredentialHasher for TestCredentialHasher {
            async fn verify(&self, plaintext: &str, stored_hash: &str) -> Result<bool, HasherError>;
        }
    }

    mock! {
        pub TestTokenIssuer {}

        #[async_trait]
        impl TokenIssuer for TestTokenIssuer {
            async fn issue(&self, claim: &IdentityClaim) -> Result<SessionToken, IssuerError>;
        }
    }

    fn stored_user() -> User {
        User::new(
            "test".to_string(),
            EmailAddress::new("test@email.com".to_string()).unwrap(),
            "$argon2id$stored_hash".to_string(),
        )
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials::new(email.to_string(), password.to_string())
    }

    fn service(
        directory: MockTestUserDirectory,
        hasher: MockTestCredentialHasher,
        issuer: MockTestTokenIssuer,
    ) -> AuthenticationService<MockTestUserDirectory, MockTestCredentialHasher, MockTestTokenIssuer>
    {
        AuthenticationService::new(Arc::new(directory), Arc::new(hasher), Arc::new(issuer))
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut directory = MockTestUserDirectory::new();
        let mut hasher = MockTestCredentialHasher::new();
        let mut issuer = MockTestTokenIssuer::new();

        let user = stored_user();
        let user_id = user.id;

        directory
            .expect_find_by_email()
            .withf(|email| email == "test@email.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        hasher
            .expect_verify()
            .withf(|plaintext, stored_hash| {
                plaintext == "senha" && stored_hash == "$argon2id$stored_hash"
            })
            .times(1)
            .returning(|_, _| Ok(true));

        issuer
            .expect_issue()
            .withf(move |claim| claim.user_id == user_id && claim.email == "test@email.com")
            .times(1)
            .returning(|_| Ok(SessionToken::new("signed-token".to_string())));

        let session = service(directory, hasher, issuer)
            .authenticate(credentials("test@email.com", "senha"))
            .await
            .expect("Authentication failed");

        assert_eq!(session.token.as_str(), "signed-token");
        assert_eq!(session.user.id, user_id);
        assert_eq!(session.user.email.as_str(), "test@email.com");
        assert_eq!(session.user.name, "test");
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let mut directory = MockTestUserDirectory::new();
        let mut hasher = MockTestCredentialHasher::new();
        let mut issuer = MockTestTokenIssuer::new();

        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        hasher.expect_verify().times(0);
        issuer.expect_issue().times(0);

        let result = service(directory, hasher, issuer)
            .authenticate(credentials("no@exists.com", "anything"))
            .await;

        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let mut directory = MockTestUserDirectory::new();
        let mut hasher = MockTestCredentialHasher::new();
        let mut issuer = MockTestTokenIssuer::new();

        let user = stored_user();
        directory
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        hasher
            .expect_verify()
            .times(1)
            .returning(|_, _| Ok(false));
        issuer.expect_issue().times(0);

        let result = service(directory, hasher, issuer)
            .authenticate(credentials("test@email.com", "wrongpass"))
            .await;

        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let mut unknown_directory = MockTestUserDirectory::new();
        unknown_directory
            .expect_find_by_email()
            .returning(|_| Ok(None));

        let mut known_directory = MockTestUserDirectory::new();
        let user = stored_user();
        known_directory
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        let mut hasher = MockTestCredentialHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(false));

        let unknown = service(
            unknown_directory,
            MockTestCredentialHasher::new(),
            MockTestTokenIssuer::new(),
        )
        .authenticate(credentials("no@exists.com", "senha"))
        .await
        .unwrap_err();

        let mismatch = service(known_directory, hasher, MockTestTokenIssuer::new())
            .authenticate(credentials("test@email.com", "wrongpass"))
            .await
            .unwrap_err();

        assert_eq!(unknown.to_string(), mismatch.to_string());
        assert_eq!(format!("{:?}", unknown), format!("{:?}", mismatch));
    }

    #[tokio::test]
    async fn test_directory_failure_is_unavailable() {
        let mut directory = MockTestUserDirectory::new();
        directory
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(DirectoryError::DatabaseError("connection refused".to_string())));

        let result = service(
            directory,
            MockTestCredentialHasher::new(),
            MockTestTokenIssuer::new(),
        )
        .authenticate(credentials("test@email.com", "senha"))
        .await;

        assert!(matches!(result, Err(AuthenticationError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_hasher_failure_is_unavailable() {
        let mut directory = MockTestUserDirectory::new();
        let user = stored_user();
        directory
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut hasher = MockTestCredentialHasher::new();
        hasher.expect_verify().times(1).returning(|_, _| {
            Err(HasherError::VerificationFailed(
                "Invalid password hash".to_string(),
            ))
        });

        let result = service(directory, hasher, MockTestTokenIssuer::new())
            .authenticate(credentials("test@email.com", "senha"))
            .await;

        assert!(matches!(result, Err(AuthenticationError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_issuer_failure_is_unavailable() {
        let mut directory = MockTestUserDirectory::new();
        let user = stored_user();
        directory
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut hasher = MockTestCredentialHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(true));

        let mut issuer = MockTestTokenIssuer::new();
        issuer
            .expect_issue()
            .times(1)
            .returning(|_| Err(IssuerError::SigningFailed("key rejected".to_string())));

        let result = service(directory, hasher, issuer)
            .authenticate(credentials("test@email.com", "senha"))
            .await;

        match result {
            Err(AuthenticationError::Unavailable(reason)) => {
                assert!(reason.contains("token issuer"));
                assert!(!reason.contains("senha"));
            }
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }
}
