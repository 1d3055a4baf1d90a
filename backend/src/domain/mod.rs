//! Domain primitives, policies, and use-cases.
//!
//! Purpose: keep the service desk rules free of transport and storage
//! concerns. Entities document their invariants; services implement the
//! driving ports declared in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Identity / Role / User: who is calling and what they may do.
//! - Service / ServiceStatus: the request lifecycle and its transitions.
//! - ServiceListQuery / ServiceView: scoping and ordering of service lists.
//! - ServiceDeskService, UserDirectoryService, ConfigurationService,
//!   DirectoryLoginService: use-case implementations.

pub mod access;
pub mod auth;
pub mod configuration_service;
pub mod directory_service;
pub mod error;
pub mod identity;
pub(crate) mod port_error_mapping;
pub mod ports;
pub mod records;
pub mod requirements;
pub mod service;
pub mod service_desk_service;
pub mod trace_id;
pub mod workflow;

pub use self::access::{AccessDenial, RequiredRoles};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::configuration_service::ConfigurationService;
pub use self::directory_service::{
    DEFAULT_SHARED_PASSWORD, DirectoryLoginService, UserDirectoryService,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{Identity, ProfileUpdate, Role, User, UserId, UserValidationError};
pub use self::records::{
    Document, DocumentTemplate, Evidence, Inspection, RecordDraft, RecordValidationError,
    ServiceRecord, ServiceRecords,
};
pub use self::requirements::{Requirements, RequirementsCatalogue};
pub use self::service::{
    Service, ServiceAction, ServiceId, ServiceParts, ServiceStatus, ServiceType,
    ServiceValidationError, TransitionError,
};
pub use self::service_desk_service::ServiceDeskService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::workflow::{
    COMPLETED_LIST_LIMIT, ServiceListQuery, ServiceOrdering, ServiceView, can_view,
};

/// Convenient result alias for use-cases and handlers.
///
/// # Examples
/// ```
/// use service_desk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
