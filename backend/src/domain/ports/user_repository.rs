//! Port abstraction for user account persistence.
use async_trait::async_trait;

use crate::domain::{Role, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError for "user repository";
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by normalised email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// List users ordered by name, optionally only those with `role`.
    async fn list(&self, role: Option<Role>) -> Result<Vec<User>, UserPersistenceError>;

    /// Persist the profile fields (`name`, `phone`) of an existing user.
    ///
    /// Returns `false` when no such user exists.
    async fn update_profile(&self, user: &User) -> Result<bool, UserPersistenceError>;
}
