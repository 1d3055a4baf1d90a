//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by `outbound` adapters.
//! Driving ports (`ServiceDeskCommand`, `ServiceDeskQuery`, `UserDirectory`,
//! `ConfigurationQuery`, `LoginService`) are implemented by domain services
//! and called by `inbound` adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod configuration_query;
mod login_service;
mod service_desk_command;
mod service_desk_query;
mod service_record_repository;
mod service_repository;
mod template_repository;
mod user_directory;
mod user_repository;

pub use configuration_query::ConfigurationQuery;
#[cfg(test)]
pub use configuration_query::MockConfigurationQuery;
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use service_desk_command::MockServiceDeskCommand;
pub use service_desk_command::{NewServiceRequest, ServiceDeskCommand};
#[cfg(test)]
pub use service_desk_query::MockServiceDeskQuery;
pub use service_desk_query::{ServiceDetail, ServiceDeskQuery};
#[cfg(test)]
pub use service_record_repository::MockServiceRecordRepository;
pub use service_record_repository::{ServiceRecordRepository, ServiceRecordRepositoryError};
#[cfg(test)]
pub use service_repository::MockServiceRepository;
pub use service_repository::{ServiceRepository, ServiceRepositoryError};
#[cfg(test)]
pub use template_repository::MockTemplateRepository;
pub use template_repository::{
    FixtureTemplateRepository, TemplateRepository, TemplateRepositoryError,
};
#[cfg(test)]
pub use user_directory::MockUserDirectory;
pub use user_directory::UserDirectory;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
