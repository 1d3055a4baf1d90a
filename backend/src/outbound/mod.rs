//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: lock-guarded in-process store, the default backend and the
//!   fake used by tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
