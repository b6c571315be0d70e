use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::PublicUser;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserDirectory;
use crate::user::ports::UserServicePort;

/// Domain service for user profile reads.
pub struct UserService<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
}

impl<D> UserService<D>
where
    D: UserDirectory,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D> UserServicePort for UserService<D>
where
    D: UserDirectory,
{
    async fn get_profile(&self, id: &UserId) -> Result<PublicUser, UserError> {
        self.directory
            .find_by_id(id)
            .await?
            .map(PublicUser::from)
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
