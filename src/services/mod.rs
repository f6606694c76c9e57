//! Client-side services: the package wizard session and package management.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod packages;
pub mod wizard;

#[derive(Debug, Error, PartialEq)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Unauthorized(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error("{0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => ServiceError::NotFound,
            RepositoryError::Unauthorized(message) => ServiceError::Unauthorized(message),
            other => ServiceError::Repository(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
