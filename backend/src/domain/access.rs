//! Access policy.
//!
//! A single pure decision maps an optional caller identity and the set of
//! roles an endpoint accepts to allow or deny. Roles are matched exactly: an
//! administrator does not inherit employee or client permissions.
//!
//! Inbound adapters translate an [`AccessDenial`] into their own failure mode
//! (a JSON error for the API, a redirect for dashboard pages).

use super::{Error, Identity, Role};

/// Roles accepted by an endpoint. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRoles(Vec<Role>);

impl RequiredRoles {
    /// Accept exactly one role.
    pub fn only(role: Role) -> Self {
        Self(vec![role])
    }

    /// Accept any of the listed roles.
    pub fn any_of<const N: usize>(roles: [Role; N]) -> Self {
        const { assert!(N > 0, "required roles must not be empty") };
        let mut roles = roles.to_vec();
        roles.dedup();
        Self(roles)
    }

    /// Accept every authenticated caller.
    pub fn any_authenticated() -> Self {
        Self::any_of([Role::Administrator, Role::Employee, Role::Client])
    }

    pub fn allows(&self, role: Role) -> bool {
        self.0.contains(&role)
    }
}

/// Reason an access decision was negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenial {
    #[error("authentication required")]
    Unauthenticated,
    #[error("role {role} is not allowed to access this resource")]
    Forbidden { role: Role },
}

impl From<AccessDenial> for Error {
    fn from(value: AccessDenial) -> Self {
        match value {
            AccessDenial::Unauthenticated => Error::unauthorized("login required"),
            AccessDenial::Forbidden { .. } => Error::forbidden(value.to_string()),
        }
    }
}

/// Decide whether `identity` may use an endpoint guarded by `required`.
///
/// # Examples
/// ```
/// use service_desk::domain::access::{authorize, AccessDenial, RequiredRoles};
/// use service_desk::domain::Role;
///
/// let required = RequiredRoles::only(Role::Administrator);
/// assert_eq!(authorize(None, &required), Err(AccessDenial::Unauthenticated));
/// ```
pub fn authorize<'a>(
    identity: Option<&'a Identity>,
    required: &RequiredRoles,
) -> Result<&'a Identity, AccessDenial> {
    let identity = identity.ok_or(AccessDenial::Unauthenticated)?;
    if required.allows(identity.role) {
        Ok(identity)
    } else {
        Err(AccessDenial::Forbidden {
            role: identity.role,
        })
    }
}
