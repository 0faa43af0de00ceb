use thiserror::Error;

use crate::api::errors::ApiError;

#[derive(Debug, Error)]
/// Errors surfaced by the page services.
///
/// `Form` and `Conflict` carry the exact text shown inline to the user;
/// the remaining variants describe outcomes the caller renders itself,
/// such as the not-found view or a redirect to the login screen.
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Type constraint error: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result alias used by all service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
