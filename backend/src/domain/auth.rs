//! Login credentials.
//!
//! Handlers parse the login payload into [`LoginCredentials`] before talking
//! to the [`crate::domain::ports::LoginService`] port.

use zeroize::Zeroizing;

use super::identity::normalise_email;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    #[error("email must be a valid address")]
    InvalidEmail,
    #[error("password must not be empty")]
    EmptyPassword,
}

impl LoginValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
        }
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and lower-cased.
/// - `password` is non-empty and keeps caller-provided whitespace. It is
///   wiped from memory on drop.
///
/// # Examples
/// ```
/// use service_desk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Admin@Example.com", "password").unwrap();
/// assert_eq!(creds.email(), "admin@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = normalise_email(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
