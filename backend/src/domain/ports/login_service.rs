//! Driving port for login.
//!
//! Inbound adapters call it to turn credentials into the [`Identity`] the
//! session will carry, without knowing how accounts are stored.

use async_trait::async_trait;

use crate::domain::{Error, Identity, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the caller's identity snapshot.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;
}
