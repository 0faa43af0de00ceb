//! Error conversion glue between the layers.
//!
//! The domain layer must not depend on the API or service error types,
//! so the `From` impls that bridge them live here instead of next to the
//! domain types.

use crate::api::errors::ApiError;
use crate::domain::types::TypeConstraintError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for ApiError {
    fn from(val: TypeConstraintError) -> Self {
        ApiError::InvalidInput(val.to_string())
    }
}
