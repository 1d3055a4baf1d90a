//! Roles, user accounts, and the identity snapshot carried by a session.
//!
//! [`Identity`] is what the session provider hands the core at the start of a
//! request. It is immutable for the request; profile changes only show up in
//! the session after the next login or an explicit refresh by the adapter.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Maximum number of characters accepted for a user's name.
pub const NAME_MAX: usize = 120;
/// Maximum number of characters accepted for a phone number.
pub const PHONE_MAX: usize = 32;

/// Validation errors for user fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("user id must be a valid UUID")]
    InvalidId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("email must contain a local part and a domain")]
    InvalidEmail,
    #[error("phone must be at most {max} characters")]
    PhoneTooLong { max: usize },
    #[error("phone may only contain digits, spaces, and + ( ) -")]
    PhoneInvalidCharacters,
    #[error("at least one of name or phone must be supplied")]
    EmptyProfileUpdate,
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

impl UserValidationError {
    /// Name of the request field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidId => "id",
            Self::EmptyName | Self::NameTooLong { .. } => "name",
            Self::InvalidEmail => "email",
            Self::PhoneTooLong { .. } | Self::PhoneInvalidCharacters => "phone",
            Self::EmptyProfileUpdate => "body",
            Self::UnknownRole(_) => "role",
        }
    }
}

/// The three roles of the service desk. Authorisation is role-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[serde(rename = "ADMINISTRADOR")]
    Administrator,
    #[serde(rename = "EMPLEADO")]
    Employee,
    #[serde(rename = "CLIENTE")]
    Client,
}

impl Role {
    /// Stable wire and storage representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Administrator => "ADMINISTRADOR",
            Self::Employee => "EMPLEADO",
            Self::Client => "CLIENTE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMINISTRADOR" => Ok(Self::Administrator),
            "EMPLEADO" => Ok(Self::Employee),
            "CLIENTE" => Ok(Self::Client),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authenticated caller as captured by the session at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    pub role: Role,
    #[schema(example = "Ana Torres")]
    pub name: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Persisted account behind an [`Identity`].
///
/// ## Invariants
/// - `name` is trimmed, non-empty, and at most [`NAME_MAX`] characters.
/// - `email` is trimmed, lower-cased, and has both sides of an `@`.
/// - `phone`, when present, is at most [`PHONE_MAX`] characters of digits,
///   spaces, and `+ ( ) -`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    role: Role,
    name: String,
    email: String,
    phone: Option<String>,
}

impl User {
    pub fn try_new(
        id: UserId,
        role: Role,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            id,
            role,
            name: validate_name(name)?,
            email: validate_email(email)?,
            phone: phone.map(validate_phone).transpose()?.flatten(),
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Apply a profile update, returning the updated account.
    ///
    /// Only `name` and `phone` are mutable; fields absent from the update keep
    /// their current value.
    pub fn with_profile(mut self, update: &ProfileUpdate) -> Self {
        if let Some(name) = &update.name {
            self.name.clone_from(name);
        }
        if let Some(phone) = &update.phone {
            self.phone.clone_from(phone);
        }
        self
    }

    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            role: self.role,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Validated profile change.
///
/// `phone: Some(None)` clears the stored phone number; an empty or blank
/// phone in the request maps to that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    name: Option<String>,
    phone: Option<Option<String>>,
}

impl ProfileUpdate {
    pub fn try_new(name: Option<&str>, phone: Option<&str>) -> Result<Self, UserValidationError> {
        if name.is_none() && phone.is_none() {
            return Err(UserValidationError::EmptyProfileUpdate);
        }
        Ok(Self {
            name: name.map(validate_name).transpose()?,
            phone: phone.map(validate_phone).transpose()?,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn phone(&self) -> Option<Option<&str>> {
        self.phone.as_ref().map(Option::as_deref)
    }
}

fn validate_name(raw: &str) -> Result<String, UserValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(UserValidationError::EmptyName);
    }
    if name.chars().count() > NAME_MAX {
        return Err(UserValidationError::NameTooLong { max: NAME_MAX });
    }
    Ok(name.to_owned())
}

fn validate_email(raw: &str) -> Result<String, UserValidationError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(email),
        _ => Err(UserValidationError::InvalidEmail),
    }
}

fn validate_phone(raw: &str) -> Result<Option<String>, UserValidationError> {
    let phone = raw.trim();
    if phone.is_empty() {
        return Ok(None);
    }
    if phone.chars().count() > PHONE_MAX {
        return Err(UserValidationError::PhoneTooLong { max: PHONE_MAX });
    }
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '(' | ')' | '-');
    if !phone.chars().all(allowed) {
        return Err(UserValidationError::PhoneInvalidCharacters);
    }
    Ok(Some(phone.to_owned()))
}

/// Normalise an email for lookups.
pub fn normalise_email(raw: &str) -> Result<String, UserValidationError> {
    validate_email(raw)
}
