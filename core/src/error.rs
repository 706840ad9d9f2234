//! Error types for the account API client.
//!
//! # Design
//! Only three things can go wrong: a mandatory setting was left empty, the
//! request never got an answer, or a response body did not have the shape a
//! helper expected. HTTP error statuses are not errors here. A 404 or 409 is a
//! completed exchange and comes back through the normal `Envelope` path.

use std::fmt;

use thiserror::Error;

use crate::envelope::Envelope;
use crate::http::TransportError;

/// A mandatory connection setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Host,
    BasePath,
    Resource,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Parameter::Host => "host",
            Parameter::BasePath => "base_path",
            Parameter::Resource => "resource",
        };
        f.write_str(name)
    }
}

/// Errors returned by `Config`, `Client` and the JSON helpers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A mandatory setting was empty when the configuration was built.
    #[error("parameter not set: {0}")]
    MissingParameter(Parameter),

    /// The request could not be sent or no response came back.
    #[error("transport failure for <{uri}>: {source}")]
    TransportFailure {
        uri: String,
        #[source]
        source: TransportError,
        envelope: Envelope,
    },

    /// A response body did not match the expected JSON shape.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String, body: Vec<u8> },
}

impl ApiError {
    pub(crate) fn transport(uri: &str, source: TransportError) -> Self {
        ApiError::TransportFailure {
            uri: uri.to_string(),
            source,
            envelope: Envelope::unreached(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>, body: &[u8]) -> Self {
        ApiError::MalformedResponse {
            reason: reason.into(),
            body: body.to_vec(),
        }
    }

    /// The envelope attached to a transport failure, if any.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            ApiError::TransportFailure { envelope, .. } => Some(envelope),
            _ => None,
        }
    }

    /// `true` when the failure was the request timeout elapsing.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            ApiError::TransportFailure {
                source: TransportError::Timeout(_),
                ..
            }
        )
    }
}
