//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain's repository ports, backed by
//! PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Workflow rules stay in the domain.
//! - **Internal models**: row structs (`models.rs`) and the table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: every pool and Diesel failure maps onto the port's own
//!   `Connection`/`Query` error.
//!
//! ```ignore
//! use service_desk::outbound::persistence::{DbPool, DieselServiceRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/service_desk")).await?;
//! let services = DieselServiceRepository::new(pool);
//! ```

mod diesel_demo_seeder;
mod diesel_service_record_repository;
mod diesel_service_repository;
mod diesel_template_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_demo_seeder::DieselDemoSeeder;
pub use diesel_service_record_repository::DieselServiceRecordRepository;
pub use diesel_service_repository::DieselServiceRepository;
pub use diesel_template_repository::DieselTemplateRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
