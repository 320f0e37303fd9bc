// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Payloads merged into the success envelope, plus the envelope shape
//! itself for the OpenAPI document.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::peer::KeyEntry;

/// Wire shape shared by every API response.
///
/// Success responses add the fields of the endpoint's payload next to
/// `success`; failures carry only `reason`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct EnvelopeBody {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Payload of `GET /api/v1/keys`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct KeysResponse {
    /// This node's own key.
    pub mykey: KeyEntry,
    /// Every key in the authorized key registry.
    pub authorized_keys: Vec<KeyEntry>,
}

/// Payload of `GET /api/v1/storage/{address}`.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct ValueResponse {
    /// Stored value: a string written with `POST`, or an integer maintained by `PUT`.
    #[schema(value_type = Object)]
    pub value: Value,
}
