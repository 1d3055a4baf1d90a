//! User directory and login use-cases.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use zeroize::Zeroizing;

use crate::domain::access::{RequiredRoles, authorize};
use crate::domain::port_error_mapping::map_user_repository_error;
use crate::domain::ports::{LoginService, UserDirectory, UserRepository};
use crate::domain::{Error, Identity, LoginCredentials, ProfileUpdate, Role, User};

/// Password accepted for seeded accounts when none is configured.
pub const DEFAULT_SHARED_PASSWORD: &str = "password";

/// Listings and profile edits over the user store.
#[derive(Clone)]
pub struct UserDirectoryService<U> {
    users: Arc<U>,
}

impl<U> UserDirectoryService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UserDirectory for UserDirectoryService<U>
where
    U: UserRepository,
{
    async fn list_users(&self, caller: &Identity) -> Result<Vec<User>, Error> {
        authorize(Some(caller), &RequiredRoles::only(Role::Administrator))?;
        self.users
            .list(None)
            .await
            .map_err(map_user_repository_error)
    }

    async fn available_employees(&self, caller: &Identity) -> Result<Vec<User>, Error> {
        authorize(Some(caller), &RequiredRoles::only(Role::Administrator))?;
        self.users
            .list(Some(Role::Employee))
            .await
            .map_err(map_user_repository_error)
    }

    async fn update_profile(&self, caller: &Identity, update: ProfileUpdate) -> Result<User, Error> {
        let missing = || Error::not_found(format!("user {} not found", caller.id));
        let current = self
            .users
            .find_by_id(&caller.id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(missing)?;

        let updated = current.with_profile(&update);
        let stored = self
            .users
            .update_profile(&updated)
            .await
            .map_err(map_user_repository_error)?;
        if !stored {
            return Err(missing());
        }
        tracing::info!(user_id = %caller.id, "profile updated");
        Ok(updated)
    }
}

/// Login against the user store with one shared password.
///
/// Accounts carry no credential of their own yet, so every known email
/// authenticates with the configured shared password. Unknown emails and
/// wrong passwords are indistinguishable to the caller.
#[derive(Clone)]
pub struct DirectoryLoginService<U> {
    users: Arc<U>,
    shared_password: Zeroizing<String>,
}

impl<U> DirectoryLoginService<U> {
    pub fn new(users: Arc<U>, shared_password: impl Into<String>) -> Self {
        Self {
            users,
            shared_password: Zeroizing::new(shared_password.into()),
        }
    }
}

#[async_trait]
impl<U> LoginService for DirectoryLoginService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error> {
        let rejected = || {
            Error::unauthorized("invalid credentials")
                .with_details(json!({ "code": "invalid_credentials" }))
        };
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(rejected)?;
        if credentials.password() != self.shared_password.as_str() {
            tracing::info!(user_id = %user.id(), "login rejected");
            return Err(rejected());
        }
        Ok(user.identity())
    }
}
