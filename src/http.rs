//! # HTTP transport
//! The [`Client`] trait abstracts over the HTTP GET requests made by the library, so that the
//! record retrieval logic can be exercised without a network connection.
#[cfg(test)]
pub mod mock;

use std::time::Duration;

use ureq::{
    Agent, Body,
    http::{self, StatusCode, Uri},
};

use crate::error::ServiceError;

pub trait Client {
    type Body: BodyBytes;

    /// Perform a GET request with the provided headers.
    fn get<T>(
        &self,
        uri: T,
        headers: &[(&str, &str)],
    ) -> Result<http::Response<Self::Body>, ServiceError>
    where
        Uri: TryFrom<T>,
        <Uri as TryFrom<T>>::Error: Into<http::Error>;

    /// Block the calling thread for the given duration.
    fn wait(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

pub trait BodyBytes {
    fn bytes(self) -> Result<Vec<u8>, ServiceError>;
}

impl BodyBytes for Body {
    fn bytes(mut self) -> Result<Vec<u8>, ServiceError> {
        self.read_to_vec().map_err(Into::into)
    }
}

impl BodyBytes for Vec<u8> {
    fn bytes(self) -> Result<Vec<u8>, ServiceError> {
        Ok(self)
    }
}

pub struct UreqClient {
    inner: Agent,
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqClient {
    pub fn new() -> Self {
        static APP_USER_AGENT: &str = concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION"),
            " (",
            env!("CARGO_PKG_HOMEPAGE"),
            ")",
        );

        let config = Agent::config_builder()
            .user_agent(APP_USER_AGENT)
            .http_status_as_error(false)
            .build();
        let inner = Agent::new_with_config(config);
        Self { inner }
    }
}

impl Client for UreqClient {
    type Body = Body;

    fn get<T>(&self, uri: T, headers: &[(&str, &str)]) -> Result<http::Response<Body>, ServiceError>
    where
        Uri: TryFrom<T>,
        <Uri as TryFrom<T>>::Error: Into<http::Error>,
    {
        let mut request = self.inner.get(uri);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        request.call().map_err(Into::into)
    }
}

/// The interpretation of a response.
#[derive(Debug, PartialEq)]
pub enum Fetched {
    /// The server returned a non-empty body.
    Content(Vec<u8>),
    /// The server has nothing for the request.
    NoContent,
    /// The server refused the request because too many requests were made.
    RateLimited,
}

/// Classify a response by its status code and body.
///
/// Successful responses with a blank body, as well as `404 Not Found` and `410 Gone`, have no
/// content. `429 Too Many Requests` is rate limiting. Any other status is an error.
pub fn classify<B: BodyBytes>(
    response: http::Response<B>,
    url: &str,
) -> Result<Fetched, ServiceError> {
    match response.status() {
        code if code.is_success() => {
            let body = response.into_body().bytes()?;
            if body.iter().all(u8::is_ascii_whitespace) {
                Ok(Fetched::NoContent)
            } else {
                Ok(Fetched::Content(body))
            }
        }
        StatusCode::NOT_FOUND | StatusCode::GONE => Ok(Fetched::NoContent),
        StatusCode::TOO_MANY_REQUESTS => Ok(Fetched::RateLimited),
        code => Err(ServiceError::UnexpectedStatusCode {
            code,
            url: url.to_owned(),
        }),
    }
}
