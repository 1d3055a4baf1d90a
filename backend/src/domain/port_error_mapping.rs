//! Conversions from driven-port errors into domain [`Error`]s.
//!
//! Connection failures become `service_unavailable`; anything else the store
//! reports becomes `internal` and is redacted by the HTTP adapter.

use super::Error;
use super::ports::{
    ServiceRecordRepositoryError, ServiceRepositoryError, TemplateRepositoryError,
    UserPersistenceError,
};

pub(crate) fn map_service_repository_error(error: ServiceRepositoryError) -> Error {
    match error {
        ServiceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("service repository unavailable: {message}"))
        }
        ServiceRepositoryError::Query { message } => {
            Error::internal(format!("service repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_record_repository_error(error: ServiceRecordRepositoryError) -> Error {
    match error {
        ServiceRecordRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("service record repository unavailable: {message}"))
        }
        ServiceRecordRepositoryError::Query { message } => {
            Error::internal(format!("service record repository error: {message}"))
        }
    }
}

pub(crate) fn map_template_repository_error(error: TemplateRepositoryError) -> Error {
    match error {
        TemplateRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("template repository unavailable: {message}"))
        }
        TemplateRepositoryError::Query { message } => {
            Error::internal(format!("template repository error: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(ServiceRepositoryError::connection("down"), ErrorCode::ServiceUnavailable)]
    #[case(ServiceRepositoryError::query("bad sql"), ErrorCode::InternalError)]
    fn service_errors_map_by_kind(
        #[case] error: ServiceRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        assert_eq!(map_service_repository_error(error).code(), expected);
    }

    #[rstest]
    fn user_connection_errors_keep_the_cause() {
        let error = map_user_repository_error(UserPersistenceError::connection("refused"));
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert!(error.message().contains("refused"));
    }
}
