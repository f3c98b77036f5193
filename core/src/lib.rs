//! Blocking client for the Siwar Arabic lexicon API.
//!
//! # Overview
//! `SiwarClient` turns method calls (search, lexicon listing, senses,
//! examples, synonyms, ...) into authenticated GET requests against the
//! service's fixed REST endpoints and decodes the JSON answers into the
//! records in [`types`].
//!
//! # Design
//! - Request building and response parsing are pure (`build_*` / `parse_*`);
//!   only the [`Transport`] does I/O, and the default one is `ureq`.
//! - A 401 is `Error::Authentication`; every other failure is
//!   `Error::Api` with the cause attached. Nothing is retried.
//! - The [`validate`] helpers are for callers; the client does not run them.
//!
//! ```no_run
//! use siwar_core::SiwarClient;
//!
//! let client = SiwarClient::new("your-api-key");
//! for result in client.search_public("محرك", None)? {
//!     println!("{} ({})", result.lemma, result.lexicon_name);
//! }
//! # Ok::<(), siwar_core::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::SiwarClient;
pub use config::ClientConfig;
pub use endpoints::{Access, Endpoint};
pub use error::{ApiError, Error, Result, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Example, ExampleType, LemmaType, LexiconEntry, PartOfSpeech, SearchResult, Sense, Translation,
    WordForm,
};
pub use validate::{is_valid_api_key, is_valid_lexicon_ids, is_valid_query, strip_diacritics};
