//! Blocking HTTP client for an organisation-scoped accounts API.
//!
//! # Overview
//! Validates and defaults connection settings, derives the Target URI once,
//! and runs create / fetch / delete against a JSON:API-style server. Every
//! exchange comes back as an `Envelope` of raw body bytes and status code;
//! interpreting 4xx/5xx is left to the caller. The `json` helpers pull the
//! `id` and `version` needed for follow-up calls out of a response body.
//!
//! # Design
//! - `Config` is immutable once built. New settings mean a new `Client`.
//! - Requests are plain `HttpRequest` data handed to a `Transport`, with
//!   `UreqTransport` as the default.
//! - Only a request that gets no response is an error (`TransportFailure`,
//!   status `-1`).

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod json;
pub mod types;
pub mod uri;

pub use client::Client;
pub use config::{Config, Defaults, Parameters};
pub use envelope::Envelope;
pub use error::{ApiError, Parameter};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use json::{decode_account, extract_id, extract_identity, extract_version, pretty_print};
pub use types::{Account, AccountAttributes, AccountDocument, Links, ResourceIdentity};
