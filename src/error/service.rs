use thiserror::Error;
use ureq::http::{self, StatusCode};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] ureq::Error),
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] http::Error),
    #[error("Unexpected status code {code} from '{url}'")]
    UnexpectedStatusCode { code: StatusCode, url: String },
    #[error("Rate limit exceeded for '{0}'")]
    RateLimitExceeded(String),
    #[error("Unexpected data returned by FOLIO: {0}")]
    UnexpectedData(String),
    #[error("Invalid JSON in response: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
