//! Executes `HttpRequest` values over the network.
//!
//! # Design
//! `Transport` is the only place the client touches I/O. `UreqTransport`
//! wraps a single `ureq::Agent` whose connection pool is shared by every
//! call. The agent is configured not to treat 4xx/5xx as errors so status
//! interpretation stays in `SiwarClient::parse_response`; only failures
//! where no response arrived come back as `TransportError`.

use std::time::Duration;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs one HTTP exchange. Implementations must be usable from several
/// threads at once.
pub trait Transport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by `ureq`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// `timeout` bounds the whole call, connect through reading the body.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request
            .full_url()
            .map_err(|e| TransportError(format!("invalid url {}: {e}", request.url)))?;

        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url.as_str()), &request.headers).call(),
            HttpMethod::Post => {
                let builder = with_headers(self.agent.post(url.as_str()), &request.headers);
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| TransportError(format!("failed to read response body: {e}")))?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn with_headers<B>(
    builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    headers
        .iter()
        .fold(builder, |builder, (name, value)| builder.header(name.as_str(), value.as_str()))
}
