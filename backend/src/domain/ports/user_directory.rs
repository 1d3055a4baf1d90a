//! Driving port for user listings and profile edits.

use async_trait::async_trait;

use crate::domain::{Error, Identity, ProfileUpdate, User};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Every account, for administrators.
    async fn list_users(&self, caller: &Identity) -> Result<Vec<User>, Error>;

    /// Employees that can receive assignments, for administrators.
    async fn available_employees(&self, caller: &Identity) -> Result<Vec<User>, Error>;

    /// Change the caller's own name and/or phone.
    async fn update_profile(&self, caller: &Identity, update: ProfileUpdate) -> Result<User, Error>;
}
