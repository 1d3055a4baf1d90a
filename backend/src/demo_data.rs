//! Demo accounts, services, and templates for local runs.
//!
//! Identifiers are fixed so repeated seeding is idempotent and the demo
//! logins stay stable across restarts:
//!
//! | email | role |
//! |---|---|
//! | `admin@example.com` | ADMINISTRADOR |
//! | `employee@example.com` | EMPLEADO |
//! | `employee2@example.com` | EMPLEADO |
//! | `client@example.com` | CLIENTE |

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::{
    DocumentTemplate, Role, Service, ServiceId, ServiceType, User, UserId, UserValidationError,
};

pub const DEMO_ADMIN_ID: UserId = UserId::from_uuid(Uuid::from_u128(0x0d3e_0001));
pub const DEMO_EMPLOYEE_ID: UserId = UserId::from_uuid(Uuid::from_u128(0x0d3e_0002));
pub const DEMO_SECOND_EMPLOYEE_ID: UserId = UserId::from_uuid(Uuid::from_u128(0x0d3e_0003));
pub const DEMO_CLIENT_ID: UserId = UserId::from_uuid(Uuid::from_u128(0x0d3e_0004));

/// Errors raised while building demo data.
#[derive(Debug, thiserror::Error)]
pub enum DemoDataError {
    #[error("invalid demo user: {0}")]
    User(#[from] UserValidationError),
    #[error("invalid demo service: {0}")]
    Service(String),
}

/// Everything a demo seed writes.
#[derive(Debug, Clone)]
pub struct DemoData {
    pub users: Vec<User>,
    pub services: Vec<Service>,
    pub templates: Vec<DocumentTemplate>,
}

impl DemoData {
    /// Build the demo set relative to `now`.
    pub fn build(now: DateTime<Utc>) -> Result<Self, DemoDataError> {
        let users = vec![
            User::try_new(
                DEMO_ADMIN_ID,
                Role::Administrator,
                "Ana Administradora",
                "admin@example.com",
                Some("+34 910 000 001"),
            )?,
            User::try_new(
                DEMO_EMPLOYEE_ID,
                Role::Employee,
                "Elena Empleada",
                "employee@example.com",
                Some("+34 910 000 002"),
            )?,
            User::try_new(
                DEMO_SECOND_EMPLOYEE_ID,
                Role::Employee,
                "Emilio Empleado",
                "employee2@example.com",
                None,
            )?,
            User::try_new(
                DEMO_CLIENT_ID,
                Role::Client,
                "Carlos Cliente",
                "client@example.com",
                Some("+34 600 000 004"),
            )?,
        ];

        let service = |n: u128, kind: &str, start_in_days: i64| -> Result<Service, DemoDataError> {
            let service_type =
                ServiceType::new(kind).map_err(|err| DemoDataError::Service(err.to_string()))?;
            Ok(Service::request(
                ServiceId::from_uuid(Uuid::from_u128(0x5e7_0000 + n)),
                DEMO_CLIENT_ID,
                service_type,
                now + Duration::days(start_in_days),
                now - Duration::days(7),
            ))
        };
        let transition = |err: crate::domain::TransitionError| DemoDataError::Service(err.to_string());

        let pending = service(1, "installation", 3)?;
        let assigned = service(2, "maintenance", 1)?
            .assign(DEMO_EMPLOYEE_ID)
            .map_err(transition)?;
        let in_progress = service(3, "repair", 0)?
            .assign(DEMO_EMPLOYEE_ID)
            .and_then(|s| s.start(DEMO_EMPLOYEE_ID))
            .map_err(transition)?;
        let completed = service(4, "inspection", -2)?
            .assign(DEMO_EMPLOYEE_ID)
            .and_then(|s| s.start(DEMO_EMPLOYEE_ID))
            .and_then(|s| s.complete(DEMO_EMPLOYEE_ID, now - Duration::days(1)))
            .map_err(transition)?;

        let templates = vec![
            DocumentTemplate {
                id: Uuid::from_u128(0x7e3_0001),
                name: "Installation certificate".to_owned(),
                created_at: now - Duration::days(30),
                user_id: DEMO_ADMIN_ID,
            },
            DocumentTemplate {
                id: Uuid::from_u128(0x7e3_0002),
                name: "Maintenance report".to_owned(),
                created_at: now - Duration::days(20),
                user_id: DEMO_ADMIN_ID,
            },
        ];

        Ok(Self {
            users,
            services: vec![pending, assigned, in_progress, completed],
            templates,
        })
    }
}
