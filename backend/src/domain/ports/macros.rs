//! Error enums shared by every repository port.
//!
//! A store either cannot be reached (`Connection`) or rejects a statement
//! (`Query`). Domain services map the former to `service_unavailable` and the
//! latter to a redacted internal error.

/// Declare a repository error enum whose messages name `$subject`.
///
/// ```ignore
/// define_port_error! {
///     /// Errors raised by service repository adapters.
///     pub enum ServiceRepositoryError for "service repository";
/// }
///
/// let err = ServiceRepositoryError::connection("timed out");
/// assert_eq!(err.to_string(), "service repository connection failed: timed out");
/// ```
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident for $subject:literal;
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            /// The store could not be reached or no connection was free.
            #[error("{subject} connection failed: {message}", subject = $subject)]
            Connection { message: String },
            /// A query or mutation failed during execution.
            #[error("{subject} query failed: {message}", subject = $subject)]
            Query { message: String },
        }

        impl $name {
            pub fn connection(message: impl Into<String>) -> Self {
                Self::Connection {
                    message: message.into(),
                }
            }

            pub fn query(message: impl Into<String>) -> Self {
                Self::Query {
                    message: message.into(),
                }
            }
        }
    };
}

pub(crate) use define_port_error;
