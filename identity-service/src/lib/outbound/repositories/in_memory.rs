use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserDirectory;
use crate::user::errors::DirectoryError;

/// User directory kept in process memory, keyed by email.
///
/// Contents are lost on drop. Used by tests and by the `memory` backend.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a user record.
    ///
    /// # Errors
    /// * `InvalidRecord` - Password hash is empty
    /// * `EmailAlreadyExists` - Another record holds the same email
    pub async fn insert(&self, user: User) -> Result<User, DirectoryError> {
        if user.password_hash.is_empty() {
            return Err(DirectoryError::InvalidRecord(
                "password hash must not be empty".to_string(),
            ));
        }

        let mut users = self.users.write().await;
        let key = user.email.as_str().to_string();
        if users.contains_key(&key) {
            return Err(DirectoryError::EmailAlreadyExists(key));
        }

        users.insert(key, user.clone());
        Ok(user)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.id == *id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::models::EmailAddress;

    fn user(email: &str, password_hash: &str) -> User {
        User::new(
            "test".to_string(),
            EmailAddress::new(email.to_string()).unwrap(),
            password_hash.to_string(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let directory = InMemoryUserDirectory::new();
        let stored = directory
            .insert(user("test@email.com", "$argon2id$hash"))
            .await
            .unwrap();

        let by_email = directory.find_by_email("test@email.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.id), Some(stored.id));

        let by_id = directory.find_by_id(&stored.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.id), Some(stored.id));

        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn test_email_lookup_is_exact() {
        let directory = InMemoryUserDirectory::new();
        directory
            .insert(user("test@email.com", "$argon2id$hash"))
            .await
            .unwrap();

        assert!(directory
            .find_by_email("TEST@email.com")
            .await
            .unwrap()
            .is_none());
        assert!(directory
            .find_by_email(" test@email.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let directory = InMemoryUserDirectory::new();
        directory
            .insert(user("test@email.com", "$argon2id$hash"))
            .await
            .unwrap();

        let result = directory
            .insert(user("test@email.com", "$argon2id$other"))
            .await;
        assert_eq!(
            result.unwrap_err(),
            DirectoryError::EmailAlreadyExists("test@email.com".to_string())
        );
        assert_eq!(directory.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_hash_rejected() {
        let directory = InMemoryUserDirectory::new();

        let result = directory.insert(user("test@email.com", "")).await;
        assert!(matches!(result, Err(DirectoryError::InvalidRecord(_))));
        assert!(directory.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_user() {
        let directory = InMemoryUserDirectory::new();

        assert!(directory
            .find_by_email("no@exists.com")
            .await
            .unwrap()
            .is_none());
        assert!(directory.find_by_id(&UserId::new()).await.unwrap().is_none());
    }
}
