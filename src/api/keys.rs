// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorized key registry endpoints.

use axum::{extract::State, response::Response};

use super::context::RequestContext;
use crate::{
    error::PeerResult,
    identity::PublicKey,
    models::{EnvelopeBody, KeysResponse},
    peer::KeyEntry,
    state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/v1/keys",
    tag = "Keys",
    responses((status = 200, description = "This node's key and all authorized keys", body = KeysResponse))
)]
pub async fn list_keys(State(state): State<AppState>, ctx: RequestContext) -> Response {
    ctx.respond(collect_keys(&state).await)
}

async fn collect_keys(state: &AppState) -> PeerResult<KeysResponse> {
    let authorized_keys = state
        .keys
        .authorized_keys()
        .await?
        .iter()
        .map(|authorized| KeyEntry::from(&authorized.key))
        .collect();

    Ok(KeysResponse {
        mykey: KeyEntry {
            id: state.identity.key_id(),
            key: state.identity.public_key().to_string(),
        },
        authorized_keys,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/keys",
    params(
        ("key" = String, Query, description = "Public key, SPKI PEM"),
        ("name" = Option<String>, Query, description = "Registration name, defaults to the key id")
    ),
    tag = "Keys",
    responses((status = 200, description = "Envelope; failure when the key is malformed or already authorized", body = EnvelopeBody))
)]
pub async fn authorize_key(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let result = register(&state, ctx.param_or("key", ""), ctx.param("name")).await;
    ctx.respond(result)
}

async fn register(state: &AppState, raw_key: &str, name: Option<&str>) -> PeerResult<()> {
    let key: PublicKey = raw_key.parse()?;
    let name = name.unwrap_or(key.key_id()).to_string();
    state.keys.authorize(key, &name).await?;
    tracing::info!(%name, "authorized key registered");
    Ok(())
}
