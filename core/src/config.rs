//! Connection settings: validation and defaulting.
//!
//! # Design
//! Callers hand in raw strings where empty means "not set". `Config` is the
//! validated form. Defaults live in a `Defaults` value that travels with the
//! config rather than in globals, so a config rebuilt through
//! `with_parameters` fills gaps the same way the first build did.

use std::time::Duration;

use crate::error::{ApiError, Parameter};
use crate::uri;

/// Per-resource settings supplied by the caller. Empty strings and a zero
/// timeout count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters {
    /// Path prefix such as `/v1/organisation/`, including the trailing `/`.
    pub base_path: String,
    /// Resource collection name such as `accounts`.
    pub resource: String,
    pub content_type: String,
    pub timeout: Duration,
}

impl Parameters {
    pub fn new(base_path: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            resource: resource.into(),
            ..Self::default()
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Values substituted for settings the caller left empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    pub protocol: String,
    pub port: String,
    pub content_type: String,
    pub timeout: Duration,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            port: "8080".to_string(),
            content_type: "application/vnd.api+json".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Validated connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    host: String,
    port: String,
    protocol: String,
    base_path: String,
    resource: String,
    content_type: String,
    timeout: Duration,
    defaults: Defaults,
}

impl Config {
    /// Validate and default the settings using the standard `Defaults`.
    pub fn new(host: &str, port: &str, protocol: &str, params: Parameters) -> Result<Self, ApiError> {
        Self::with_defaults(host, port, protocol, params, Defaults::default())
    }

    /// Like `new`, with caller-chosen fallback values.
    ///
    /// Host, base path and resource are checked in that order and the first
    /// empty one is reported.
    pub fn with_defaults(
        host: &str,
        port: &str,
        protocol: &str,
        params: Parameters,
        defaults: Defaults,
    ) -> Result<Self, ApiError> {
        if host.is_empty() {
            return Err(ApiError::MissingParameter(Parameter::Host));
        }
        let Parameters {
            base_path,
            resource,
            content_type,
            timeout,
        } = params;
        check_resource_path(&base_path, &resource)?;

        Ok(Self {
            host: host.to_string(),
            port: or_default(port, &defaults.port),
            protocol: or_default(protocol, &defaults.protocol),
            content_type: or_default(&content_type, &defaults.content_type),
            timeout: if timeout.is_zero() { defaults.timeout } else { timeout },
            base_path,
            resource,
            defaults,
        })
    }

    /// A copy with new per-resource settings. Host, port and protocol carry
    /// over; base path and resource are validated again and the content type
    /// and timeout are defaulted again.
    pub fn with_parameters(&self, params: Parameters) -> Result<Self, ApiError> {
        Self::with_defaults(
            &self.host,
            &self.port,
            &self.protocol,
            params,
            self.defaults.clone(),
        )
    }

    /// `{protocol}://{host}:{port}{base_path}{resource}/`
    pub fn target_uri(&self) -> String {
        uri::target_uri(
            &self.protocol,
            &self.host,
            &self.port,
            &self.base_path,
            &self.resource,
        )
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn check_resource_path(base_path: &str, resource: &str) -> Result<(), ApiError> {
    if base_path.is_empty() {
        return Err(ApiError::MissingParameter(Parameter::BasePath));
    }
    if resource.is_empty() {
        return Err(ApiError::MissingParameter(Parameter::Resource));
    }
    Ok(())
}

fn or_default(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}
