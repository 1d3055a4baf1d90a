//! Pool and Diesel error mapping shared by every repository.
//!
//! Each repository passes its own `connection`/`query` constructors so the
//! port error type stays specific to the port.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// A pool failure always means the database could not be reached.
pub(crate) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Classify a Diesel error as a connection or query failure.
///
/// The database's own message is logged at debug level and never copied into
/// the port error.
pub(crate) fn map_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: FnOnce(&'static str) -> E,
    C: FnOnce(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::DatabaseError(DatabaseErrorKind::UnableToSendCommand, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("unique constraint violated")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("foreign key constraint violated")
        }
        DieselError::NotFound => query("record not found"),
        DieselError::DeserializationError(_) => query("stored row could not be decoded"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Probe {
        Query(String),
        Connection(String),
    }

    fn map(error: DieselError) -> Probe {
        map_diesel_error(
            error,
            |m| Probe::Query(m.to_owned()),
            |m| Probe::Connection(m.to_owned()),
        )
    }

    #[rstest]
    fn closed_connections_map_to_connection_errors() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_owned()),
        );
        assert_eq!(map(error), Probe::Connection("database connection error".to_owned()));
    }

    #[rstest]
    fn missing_rows_map_to_query_errors() {
        assert_eq!(map(DieselError::NotFound), Probe::Query("record not found".to_owned()));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped = map_pool_error(PoolError::checkout("timed out"), Probe::Connection);
        assert_eq!(mapped, Probe::Connection("timed out".to_owned()));
    }
}
