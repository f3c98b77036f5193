//! Request mapping and the public Siwar operations.
//!
//! # Design
//! Every operation is a fixed recipe: build query parameters, pick the path
//! from the endpoint table, send through the transport, then decode. Each
//! step is exposed on its own (`build_*`, `parse_*`) so the mapping can be
//! checked without a network, and `execute` composes them for callers that
//! just want the JSON. `execute` never decodes into records; the typed
//! operations do that on top of it.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::{ClientConfig, ACCEPT_HEADER, ACCEPT_JSON, API_KEY_HEADER};
use crate::endpoints::{Access, Endpoint};
use crate::error::{ApiError, Error, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{LexiconEntry, SearchResult};
use crate::validate::build_query_params;

/// Blocking client for the Siwar lexicon API.
///
/// Headers and base URL are fixed at construction. The client holds
/// no other state, so one instance can be shared across threads and reused
/// for every call.
#[derive(Debug, Clone)]
pub struct SiwarClient<T = UreqTransport> {
    base_url: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    transport: T,
}

impl SiwarClient<UreqTransport> {
    /// Client for the production service with default settings.
    pub fn new(api_key: &str) -> Self {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> SiwarClient<T> {
    /// Client that sends through `transport`. The configured timeout is not
    /// applied to `transport`; only `from_config` builds a transport that
    /// enforces it.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let headers = vec![
            (API_KEY_HEADER.to_string(), config.api_key),
            (ACCEPT_HEADER.to_string(), ACCEPT_JSON.to_string()),
        ];
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers,
            timeout: config.timeout,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Timeout from the `ClientConfig` this client was built with. It is
    /// the whole-call limit of the default `UreqTransport`; a transport
    /// passed to `with_transport` may ignore it.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Request mapper
    // -----------------------------------------------------------------------

    /// Build a request for a service-relative `path`.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<&Value>,
    ) -> Result<HttpRequest> {
        let mut headers = self.headers.clone();
        let body = match body {
            Some(body) => {
                let encoded = serde_json::to_string(body)
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                headers.push(("content-type".to_string(), ACCEPT_JSON.to_string()));
                Some(encoded)
            }
            None => None,
        };
        Ok(HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            query,
            headers,
            body,
        })
    }

    /// Classify a response and decode its body as JSON.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value> {
        check_status(&response)?;
        serde_json::from_str(&response.body)
            .map_err(|e| Error::from(ApiError::InvalidJson(e.to_string())))
    }

    /// Send one request and return the decoded JSON body verbatim.
    pub fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let request = self.build_request(method, path, query, body)?;
        self.send(&request)
    }

    fn send(&self, request: &HttpRequest) -> Result<Value> {
        debug!(
            "sending {} {} ({} query params)",
            request.method.as_str(),
            request.url,
            request.query.len()
        );
        let response = self.transport.send(request)?;
        debug!("{} responded with status {}", request.url, response.status);
        self.parse_response(response)
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    /// Build a lookup (`query` + optional `lexiconIds`) against `endpoint`.
    ///
    /// Private access needs at least one lexicon ID; without one this fails
    /// with `Error::MissingLexiconIds` and nothing is sent.
    pub fn build_lookup(
        &self,
        endpoint: Endpoint,
        query: &str,
        lexicon_ids: Option<&[&str]>,
        access: Access,
    ) -> Result<HttpRequest> {
        let path = endpoint
            .path(access)
            .ok_or(Error::UnsupportedAccess { endpoint, access })?;
        if access.is_private() && lexicon_ids.map_or(true, |ids| ids.is_empty()) {
            return Err(Error::MissingLexiconIds);
        }
        self.build_request(HttpMethod::Get, path, build_query_params(query, lexicon_ids), None)
    }

    pub fn build_search_public(
        &self,
        query: &str,
        lexicon_ids: Option<&[&str]>,
    ) -> Result<HttpRequest> {
        self.build_lookup(Endpoint::Search, query, lexicon_ids, Access::Public)
    }

    pub fn build_search_private(&self, query: &str, lexicon_ids: &[&str]) -> Result<HttpRequest> {
        self.build_lookup(Endpoint::Search, query, Some(lexicon_ids), Access::Private)
    }

    pub fn build_public_lexicons(&self) -> Result<HttpRequest> {
        let path = Endpoint::Lexicons
            .path(Access::Public)
            .ok_or(Error::UnsupportedAccess {
                endpoint: Endpoint::Lexicons,
                access: Access::Public,
            })?;
        self.build_request(HttpMethod::Get, path, Vec::new(), None)
    }

    // -----------------------------------------------------------------------
    // Response parsers
    // -----------------------------------------------------------------------

    pub fn parse_search(&self, response: HttpResponse) -> Result<Vec<SearchResult>> {
        decode(self.parse_response(response)?)
    }

    pub fn parse_lexicons(&self, response: HttpResponse) -> Result<Vec<LexiconEntry>> {
        decode(self.parse_response(response)?)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    /// Search public lexicons, optionally restricted to `lexicon_ids`.
    pub fn search_public(
        &self,
        query: &str,
        lexicon_ids: Option<&[&str]>,
    ) -> Result<Vec<SearchResult>> {
        let request = self.build_search_public(query, lexicon_ids)?;
        decode(self.send(&request)?)
    }

    /// Search private lexicons. `lexicon_ids` must not be empty.
    pub fn search_private(&self, query: &str, lexicon_ids: &[&str]) -> Result<Vec<SearchResult>> {
        let request = self.build_search_private(query, lexicon_ids)?;
        decode(self.send(&request)?)
    }

    /// List every public lexicon.
    pub fn get_public_lexicons(&self) -> Result<Vec<LexiconEntry>> {
        let request = self.build_public_lexicons()?;
        decode(self.send(&request)?)
    }

    /// Run a lookup and return the raw JSON payload.
    pub fn get_entry(
        &self,
        endpoint: Endpoint,
        query: &str,
        lexicon_ids: Option<&[&str]>,
        access: Access,
    ) -> Result<Value> {
        let request = self.build_lookup(endpoint, query, lexicon_ids, access)?;
        self.send(&request)
    }

    pub fn get_entry_senses(
        &self,
        query: &str,
        lexicon_ids: Option<&[&str]>,
        access: Access,
    ) -> Result<Value> {
        self.get_entry(Endpoint::Senses, query, lexicon_ids, access)
    }

    pub fn get_entry_examples(
        &self,
        query: &str,
        lexicon_ids: Option<&[&str]>,
        access: Access,
    ) -> Result<Value> {
        self.get_entry(Endpoint::Examples, query, lexicon_ids, access)
    }

    pub fn get_entry_synonyms(
        &self,
        query: &str,
        lexicon_ids: Option<&[&str]>,
        access: Access,
    ) -> Result<Value> {
        self.get_entry(Endpoint::Synonyms, query, lexicon_ids, access)
    }

    pub fn get_entry_opposites(
        &self,
        query: &str,
        lexicon_ids: Option<&[&str]>,
        access: Access,
    ) -> Result<Value> {
        self.get_entry(Endpoint::Opposites, query, lexicon_ids, access)
    }

    /// Part-of-speech information for an entry.
    pub fn get_entry_pos(
        &self,
        query: &str,
        lexicon_ids: Option<&[&str]>,
        access: Access,
    ) -> Result<Value> {
        self.get_entry(Endpoint::Pos, query, lexicon_ids, access)
    }

    pub fn get_entry_root(
        &self,
        query: &str,
        lexicon_ids: Option<&[&str]>,
        access: Access,
    ) -> Result<Value> {
        self.get_entry(Endpoint::Root, query, lexicon_ids, access)
    }

    pub fn get_entry_pattern(
        &self,
        query: &str,
        lexicon_ids: Option<&[&str]>,
        access: Access,
    ) -> Result<Value> {
        self.get_entry(Endpoint::Pattern, query, lexicon_ids, access)
    }

    /// Conjugations (word forms) of an entry.
    pub fn get_entry_conjugations(
        &self,
        query: &str,
        lexicon_ids: Option<&[&str]>,
        access: Access,
    ) -> Result<Value> {
        self.get_entry(Endpoint::Conjugations, query, lexicon_ids, access)
    }
}

/// Map non-success status codes to the appropriate error.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.status == 401 {
        return Err(Error::Authentication);
    }
    if !response.is_success() {
        return Err(ApiError::Status {
            status: response.status,
            body: response.body.clone(),
        }
        .into());
    }
    Ok(())
}

fn decode<D: DeserializeOwned>(value: Value) -> Result<D> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()).into())
}
