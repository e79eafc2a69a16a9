use std::{cell::RefCell, collections::VecDeque, time::Duration};

use ureq::http::{self, Uri};

use super::Client;
use crate::error::ServiceError;

/// A request received by a [`MockClient`].
#[derive(Debug, Clone)]
pub struct MockRequest {
    pub uri: String,
    pub headers: Vec<(String, String)>,
}

/// A client which replays queued responses in order, recording every request and wait instead
/// of touching the network or sleeping.
#[derive(Default)]
pub struct MockClient {
    responses: RefCell<VecDeque<(u16, Vec<u8>)>>,
    requests: RefCell<Vec<MockRequest>>,
    waits: RefCell<Vec<Duration>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back((status, body.as_bytes().to_vec()));
        self
    }

    /// Queue the same response `count` times.
    pub fn respond_times(mut self, count: usize, status: u16, body: &str) -> Self {
        for _ in 0..count {
            self = self.respond(status, body);
        }
        self
    }

    pub fn requests(&self) -> Vec<MockRequest> {
        self.requests.borrow().clone()
    }

    pub fn uris(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| request.uri.clone())
            .collect()
    }

    pub fn waits(&self) -> Vec<Duration> {
        self.waits.borrow().clone()
    }
}

impl Client for MockClient {
    type Body = Vec<u8>;

    fn get<T>(
        &self,
        uri: T,
        headers: &[(&str, &str)],
    ) -> Result<http::Response<Self::Body>, ServiceError>
    where
        Uri: TryFrom<T>,
        <Uri as TryFrom<T>>::Error: Into<http::Error>,
    {
        let uri = Uri::try_from(uri).map_err(Into::<http::Error>::into)?;
        self.requests.borrow_mut().push(MockRequest {
            uri: uri.to_string(),
            headers: headers
                .iter()
                .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
                .collect(),
        });

        let Some((status, body)) = self.responses.borrow_mut().pop_front() else {
            panic!("No response queued for request to '{uri}'");
        };

        Ok(http::Response::builder().status(status).body(body)?)
    }

    fn wait(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}
