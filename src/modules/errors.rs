//! Mapping of catalog failures onto the two HTTP error tiers.

use bookshelf_http::AppError;

use crate::catalog::{DecodeError, ServiceError};

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        if err.is_not_found() {
            AppError::invalid("not_found", err.to_string())
        } else {
            AppError::Internal(anyhow::Error::new(err))
        }
    }
}

impl From<DecodeError> for AppError {
    fn from(err: DecodeError) -> Self {
        AppError::invalid("invalid_query", err.to_string())
    }
}

/// Existence check mapping: not-found becomes a client error with
/// `message`, any other failure stays a server error.
pub(crate) fn missing(message: &'static str) -> impl FnOnce(ServiceError) -> AppError {
    move |err| {
        if err.is_not_found() {
            AppError::invalid("not_found", message)
        } else {
            err.into()
        }
    }
}
