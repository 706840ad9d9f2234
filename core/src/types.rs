//! Account DTOs as returned by the accounts endpoint.
//!
//! # Design
//! The client itself moves raw bytes. These types are for callers that want
//! a typed view of a fetched account. Every field the server may omit is
//! optional or defaulted, so a sparse document still decodes.

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Number;

use crate::json::whole_number;

/// Top-level JSON:API document wrapping one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountDocument {
    pub data: Account,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
}

/// A single organisation account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "version_number")]
    pub version: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
    #[serde(default)]
    pub attributes: AccountAttributes,
}

fn version_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let n = Number::deserialize(deserializer)?;
    whole_number(&n).ok_or_else(|| de::Error::custom(format!("version is not an integer: {n}")))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountAttributes {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_bank_account_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_id_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
}

/// The `id` / `version` pair addressing one stored resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub id: String,
    pub version: i64,
}
