//! Service desk backend library.
//!
//! Clients request work, administrators assign it, and employees carry it
//! through `PENDING → ASSIGNED → IN_PROGRESS → COMPLETED` while filing
//! documents, inspections, and evidences.
//!
//! - [`domain`]: entities, the access policy, workflow rules, and ports.
//! - [`inbound::http`]: the `/api` JSON adapter and `/dashboard` page models.
//! - [`outbound`]: the in-memory store and the Diesel repositories.

pub mod demo_data;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
