//! Execution of plain-data requests.
//!
//! A `Transport` turns an `HttpRequest` into an `HttpResponse`. It must not
//! interpret status codes: a 404 or 500 is a successful round-trip here and
//! becomes an `ApiError` only in `TaskClient::parse_*`. Only failures to get
//! any response at all map to `ApiError::Network`.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses are returned as data rather than `Err`. No timeouts are set.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");

        let url = request.path.as_str();
        let body = request.body.as_deref();
        let result = match (request.method, body) {
            (HttpMethod::Get, _) => self.agent.get(url).call(),
            (HttpMethod::Delete, _) => self.agent.delete(url).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(url).send_empty(),
            (HttpMethod::Patch, Some(body)) => self
                .agent
                .patch(url)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Patch, None) => self.agent.patch(url).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!(status, path = %request.path, "received response");
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
