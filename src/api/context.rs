// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request view used by every resource handler.
//!
//! [`RequestContext`] is an axum extractor. It captures the original request
//! path (before nesting strips the `/api/v1` prefix) and the request
//! parameters, and it writes the response envelope.

use std::collections::HashMap;

use axum::{
    body::to_bytes,
    extract::{FromRequest, OriginalUri, Request},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::envelope::Envelope;
use crate::address::{split_path, PeerAddress, PermissionTarget};
use crate::error::PeerResult;

/// Largest form body read for parameters.
pub const MAX_FORM_BYTES: usize = 1024 * 1024;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct RequestContext {
    segments: Vec<String>,
    params: HashMap<String, String>,
    content_type: HeaderValue,
}

impl RequestContext {
    pub fn new(path: &str) -> Self {
        Self {
            segments: split_path(path),
            params: HashMap::new(),
            content_type: HeaderValue::from_static("text/html"),
        }
    }

    /// Add `name=value` pairs from an urlencoded string. Earlier values win.
    pub fn extend_params(&mut self, encoded: &[u8]) {
        for (name, value) in url::form_urlencoded::parse(encoded) {
            self.params
                .entry(name.into_owned())
                .or_insert_with(|| value.into_owned());
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn param_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.param(name).unwrap_or(default)
    }

    pub fn set_content_type(&mut self, content_type: HeaderValue) {
        self.content_type = content_type;
    }

    pub fn peer_address(&self) -> PeerResult<PeerAddress> {
        PeerAddress::from_segments(&self.segments)
    }

    pub fn permission_target(&self) -> PeerResult<PermissionTarget> {
        PermissionTarget::from_segments(&self.segments)
    }

    /// Serialize `body` as the response.
    ///
    /// A client that disconnects gets nothing written: hyper drops the request
    /// future, and this handler with it, before any response exists.
    pub fn emit_json(mut self, body: Value) -> Response {
        self.set_content_type(HeaderValue::from_static("application/json"));

        let mut response = body.to_string().into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, self.content_type);
        response
    }

    pub fn emit(self, envelope: Envelope) -> Response {
        self.emit_json(envelope.into_json())
    }

    pub fn success(self, data: impl serde::Serialize) -> Response {
        self.emit(Envelope::success(data))
    }

    pub fn failure(self, reason: impl std::fmt::Display) -> Response {
        self.emit(Envelope::failure(reason))
    }

    pub fn respond<T: serde::Serialize>(self, result: PeerResult<T>) -> Response {
        if let Err(e) = &result {
            if e.is_unavailable() {
                tracing::warn!(error = %e, "peer call failed");
            } else {
                tracing::debug!(reason = %e, "request failed");
            }
        }
        self.emit(Envelope::from_result(result))
    }
}

impl<S> FromRequest<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let uri = request
            .extensions()
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| request.uri().clone());
        let mut context = RequestContext::new(uri.path());
        if let Some(query) = uri.query() {
            context.extend_params(query.as_bytes());
        }

        let is_form = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE));
        if is_form {
            let body = to_bytes(request.into_body(), MAX_FORM_BYTES)
                .await
                .map_err(|e| Envelope::failure(format!("Failed to read form body: {e}")).into_response())?;
            context.extend_params(&body);
        }

        Ok(context)
    }
}
