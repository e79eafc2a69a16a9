//! # Error implementation
//! The error types which result from normal usage of the library.
//!
//! Every failure surfaced by [`Folio`](crate::Folio) is an [`Error`]. Problems talking to the
//! server are wrapped in a [`ServiceError`].
mod accession;
mod service;

use thiserror::Error;

pub use accession::{AccessionNumberError, AccessionNumberErrorKind};
pub use service::ServiceError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Could not find a record for '{0}'")]
    NotFound(String),
    #[error("FOLIO service error: {0}")]
    Service(#[from] ServiceError),
}

impl From<AccessionNumberError> for Error {
    fn from(err: AccessionNumberError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}
