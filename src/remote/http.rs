use std::io::Read;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::Credentials;
use crate::error::TransportError;

use super::{Method, RawResponse, Transport};

/// Blocking HTTPS transport with HTTP Basic authentication.
pub struct HttpTransport {
    agent: ureq::Agent,
    authorization: String,
}

impl HttpTransport {
    pub fn new(credentials: &Credentials, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        HttpTransport {
            agent: builder.build(),
            authorization: basic_auth(&credentials.username, &credentials.password),
        }
    }
}

/// Value of the `Authorization` header for Basic auth.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

impl Transport for HttpTransport {
    fn send(&self, method: Method, url: &str) -> Result<RawResponse, TransportError> {
        log::debug!("{method} {url}");
        let mut request = self
            .agent
            .request(method.as_str(), url)
            .set("Authorization", &self.authorization);
        if method == Method::Propfind {
            request = request.set("Depth", "1");
        }

        let response = match request.call() {
            Ok(resp) => resp,
            // ureq reports 4xx/5xx as errors; the caller decides what a status means.
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(t)) => {
                return Err(TransportError {
                    url: url.to_string(),
                    message: t.to_string(),
                })
            }
        };

        let status = response.status();
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| TransportError {
                url: url.to_string(),
                message: format!("reading body: {e}"),
            })?;
        log::debug!("{method} {url} -> {status} ({} bytes)", body.len());

        Ok(RawResponse { status, body })
    }
}
