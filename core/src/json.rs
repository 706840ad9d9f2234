//! Helpers over raw JSON:API response bodies.
//!
//! Each extractor decodes only the fields it needs through a small typed
//! schema, so a body of the wrong shape is a `MalformedResponse` rather than
//! a panic.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::ApiError;
use crate::types::{AccountDocument, ResourceIdentity};

#[derive(Deserialize)]
struct Document<T> {
    data: T,
}

#[derive(Deserialize)]
struct IdField {
    id: String,
}

#[derive(Deserialize)]
struct VersionField {
    version: Number,
}

#[derive(Deserialize)]
struct IdentityFields {
    id: String,
    version: Number,
}

fn decode<'a, T: Deserialize<'a>>(body: &'a [u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::malformed(e.to_string(), body))
}

/// `n` as an `i64` when it has no fractional part and fits. Integral floats
/// such as `3.0` count.
pub(crate) fn whole_number(n: &Number) -> Option<i64> {
    if let Some(v) = n.as_i64() {
        return Some(v);
    }
    match n.as_f64() {
        Some(v) if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 => Some(v as i64),
        _ => None,
    }
}

fn integral(version: &Number, body: &[u8]) -> Result<i64, ApiError> {
    whole_number(version).ok_or_else(|| {
        ApiError::malformed(format!("data.version is not an integer: {version}"), body)
    })
}

/// `data.id` of a response body.
pub fn extract_id(body: &[u8]) -> Result<String, ApiError> {
    let doc: Document<IdField> = decode(body)?;
    Ok(doc.data.id)
}

/// `data.version` of a response body. Fractional values are rejected.
pub fn extract_version(body: &[u8]) -> Result<i64, ApiError> {
    let doc: Document<VersionField> = decode(body)?;
    integral(&doc.data.version, body)
}

/// Both `data.id` and `data.version`.
pub fn extract_identity(body: &[u8]) -> Result<ResourceIdentity, ApiError> {
    let doc: Document<IdentityFields> = decode(body)?;
    let version = integral(&doc.data.version, body)?;
    Ok(ResourceIdentity {
        id: doc.data.id,
        version,
    })
}

/// Typed view of an account document.
pub fn decode_account(body: &[u8]) -> Result<AccountDocument, ApiError> {
    decode(body)
}

/// Re-indent a JSON body with two spaces, keeping key order.
pub fn pretty_print(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = decode(body)?;
    serde_json::to_string_pretty(&value).map_err(|e| ApiError::malformed(e.to_string(), body))
}
