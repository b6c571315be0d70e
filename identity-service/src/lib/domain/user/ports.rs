use async_trait::async_trait;

use crate::domain::user::models::PublicUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::DirectoryError;
use crate::user::errors::UserError;

/// Read access to stored user records.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Retrieve user by email address, compared exactly.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Backend unreachable or query failed
    /// * `CorruptRecord` - Stored row could not be mapped to a user
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DirectoryError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Backend unreachable or query failed
    /// * `CorruptRecord` - Stored row could not be mapped to a user
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DirectoryError>;
}

/// Port for user profile operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Retrieve the public profile of a user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Directory` - Directory lookup failed
    async fn get_profile(&self, id: &UserId) -> Result<PublicUser, UserError>;
}
