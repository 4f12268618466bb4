//! HTTP transport abstraction for testability.
//!
//! The [`HttpTransport`] trait abstracts the two controller calls the enforcer needs,
//! allowing production code to use [`ReqwestTransport`] while tests use `MockTransport`.
//!
//! A transport only reports what happened on the wire. Deciding whether a status
//! code counts as success is left to the enforcer.

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::config::OdlClientConfig;
use crate::error::OdlError;

const JSON_CONTENT_TYPE: &str = "application/json";

/// A controller response: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body (empty when the body could not be read)
    pub body: String,
}

impl HttpResponse {
    /// Returns `true` for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait abstracting controller HTTP calls.
///
/// # Implementations
///
/// - [`ReqwestTransport`]: blocking `reqwest` client with basic auth
/// - `MockTransport`: records requests and replays canned responses (tests only)
///
/// # Errors
///
/// Both methods return `OdlError::Transport` when no response was received
/// (connection refused, timeout, TLS failure). Non-2xx responses are `Ok`.
pub trait HttpTransport: Send + Sync {
    /// Sends `PUT url` with a JSON body.
    fn put_json(&self, url: &str, body: String) -> Result<HttpResponse, OdlError>;

    /// Sends `DELETE url` without a body.
    fn delete(&self, url: &str) -> Result<HttpResponse, OdlError>;
}

/// Production transport backed by `reqwest::blocking`.
///
/// Every request carries basic auth and `Accept: application/json`, and is
/// bounded by the configured timeout.
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    username: String,
    password: String,
}

impl ReqwestTransport {
    /// Builds a client from the controller configuration.
    ///
    /// # Errors
    ///
    /// Returns `OdlError::ClientBuild` if the TLS backend cannot be initialized.
    pub fn new(config: &OdlClientConfig) -> Result<Self, OdlError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("flowguard/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| OdlError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn finish(response: reqwest::blocking::Response) -> HttpResponse {
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        HttpResponse { status, body }
    }
}

impl HttpTransport for ReqwestTransport {
    fn put_json(&self, url: &str, body: String) -> Result<HttpResponse, OdlError> {
        let response = self
            .client
            .put(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .map_err(|e| OdlError::Transport(e.to_string()))?;

        Ok(Self::finish(response))
    }

    fn delete(&self, url: &str) -> Result<HttpResponse, OdlError> {
        let response = self
            .client
            .delete(url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, JSON_CONTENT_TYPE)
            .send()
            .map_err(|e| OdlError::Transport(e.to_string()))?;

        Ok(Self::finish(response))
    }
}

/// Mock transport for unit tests.
#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use super::*;

    /// A request captured by [`MockTransport`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedRequest {
        pub method: &'static str,
        pub url: String,
        pub body: Option<String>,
    }

    /// Records every request and answers with a fixed status, or fails outright.
    pub struct MockTransport {
        status: u16,
        body: String,
        fail_with: Option<String>,
        requests: Mutex<Vec<RecordedRequest>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                status: 200,
                body: String::new(),
                fail_with: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn with_status(mut self, status: u16, body: &str) -> Self {
            self.status = status;
            self.body = body.to_owned();
            self
        }

        pub fn with_transport_error(mut self, reason: &str) -> Self {
            self.fail_with = Some(reason.to_owned());
            self
        }

        pub fn requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn answer(&self, request: RecordedRequest) -> Result<HttpResponse, OdlError> {
            self.requests.lock().unwrap().push(request);
            match &self.fail_with {
                Some(reason) => Err(OdlError::Transport(reason.clone())),
                None => Ok(HttpResponse {
                    status: self.status,
                    body: self.body.clone(),
                }),
            }
        }
    }

    impl HttpTransport for MockTransport {
        fn put_json(&self, url: &str, body: String) -> Result<HttpResponse, OdlError> {
            self.answer(RecordedRequest {
                method: "PUT",
                url: url.to_owned(),
                body: Some(body),
            })
        }

        fn delete(&self, url: &str) -> Result<HttpResponse, OdlError> {
            self.answer(RecordedRequest {
                method: "DELETE",
                url: url.to_owned(),
                body: None,
            })
        }
    }
}
