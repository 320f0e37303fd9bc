// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The `{success, reason?, ...}` wrapper every API response uses.
//!
//! Failures are never signalled through the HTTP status: both variants are
//! written with `200 OK`.

use std::fmt::Display;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success(Map<String, Value>),
    Failure(String),
}

impl Envelope {
    /// Success carrying the fields of `data`.
    ///
    /// `data` must serialize to a map (or to `null`/unit for no fields).
    pub fn success(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(Value::Object(fields)) => Self::Success(fields),
            Ok(Value::Null) => Self::Success(Map::new()),
            Ok(other) => Self::Failure(format!("Response data is not an object: {other}")),
            Err(e) => Self::Failure(format!("Failed to serialize response: {e}")),
        }
    }

    pub fn failure(reason: impl Display) -> Self {
        Self::Failure(reason.to_string())
    }

    /// Boundary conversion from a collaborator result.
    pub fn from_result<T: Serialize, E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::failure(e),
        }
    }

    pub fn into_json(self) -> Value {
        let mut body = Map::new();
        match self {
            Self::Success(fields) => {
                body.extend(fields);
                body.remove("reason");
                body.insert("success".into(), Value::Bool(true));
            }
            Self::Failure(reason) => {
                body.insert("success".into(), Value::Bool(false));
                body.insert("reason".into(), Value::String(reason));
            }
        }
        Value::Object(body)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.into_json())).into_response()
    }
}
