use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::TransportError;

use super::{Method, RawResponse, Transport};

#[derive(Debug, Clone)]
enum Canned {
    Response(RawResponse),
    Failure(String),
}

/// Serves canned responses from memory and records every request.
///
/// Unknown `(method, url)` pairs answer 404. Used for offline runs and tests.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    routes: HashMap<(Method, String), Canned>,
    log: RefCell<Vec<(Method, String)>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, method: Method, url: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            (method, url.to_string()),
            Canned::Response(RawResponse {
                status,
                body: body.as_bytes().to_vec(),
            }),
        );
        self
    }

    pub fn with_bytes(mut self, method: Method, url: &str, status: u16, body: Vec<u8>) -> Self {
        self.routes.insert(
            (method, url.to_string()),
            Canned::Response(RawResponse { status, body }),
        );
        self
    }

    /// Make `(method, url)` fail before any response, like a refused connection.
    pub fn with_failure(mut self, method: Method, url: &str, message: &str) -> Self {
        self.routes
            .insert((method, url.to_string()), Canned::Failure(message.to_string()));
        self
    }

    /// Requests seen so far, in order.
    pub fn requests(&self) -> Vec<(Method, String)> {
        self.log.borrow().clone()
    }

    /// How many times `(method, url)` was requested.
    pub fn count(&self, method: Method, url: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|(m, u)| *m == method && u == url)
            .count()
    }
}

impl Transport for MemoryTransport {
    fn send(&self, method: Method, url: &str) -> Result<RawResponse, TransportError> {
        self.log.borrow_mut().push((method, url.to_string()));
        match self.routes.get(&(method, url.to_string())) {
            Some(Canned::Response(r)) => Ok(r.clone()),
            Some(Canned::Failure(msg)) => Err(TransportError {
                url: url.to_string(),
                message: msg.clone(),
            }),
            None => Ok(RawResponse {
                status: 404,
                body: Vec::new(),
            }),
        }
    }
}
