// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Key-value storage endpoints.
//!
//! One handler set serves every address under `/api/v1/storage/`. The verb
//! picks the storage primitive:
//!
//! | Verb | Primitive |
//! |------|-----------|
//! | `GET` | `get` |
//! | `PUT` | `incr` (`amount` = 1, `default` = 0) |
//! | `POST` | `set` (`data` = "") |

use axum::{extract::State, response::Response};

use super::context::RequestContext;
use crate::{
    error::{PeerError, PeerResult},
    models::{EnvelopeBody, ValueResponse},
    state::AppState,
};

/// Reason reported for reads of an absent value.
pub const KEY_NOT_FOUND: &str = "Key not found";

#[utoipa::path(
    get,
    path = "/api/v1/storage/{address}",
    params(("address" = String, Path, description = "`<host>/<path...>` on the peer")),
    tag = "Storage",
    responses((status = 200, description = "Envelope with `value`, or failure `Key not found`", body = ValueResponse))
)]
pub async fn read_value(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let address = match ctx.peer_address() {
        Ok(address) => address,
        Err(e) => return ctx.respond::<()>(Err(e)),
    };

    match state.storage.get(&address.host, &address.path).await {
        Ok(Some(value)) => ctx.success(ValueResponse { value }),
        Ok(None) => ctx.failure(KEY_NOT_FOUND),
        Err(e) => ctx.respond::<()>(Err(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/storage/{address}",
    params(
        ("address" = String, Path, description = "`<host>/<path...>` on the peer"),
        ("amount" = Option<i64>, Query, description = "Increment, default 1"),
        ("default" = Option<i64>, Query, description = "Starting value when absent, default 0")
    ),
    tag = "Storage",
    responses((status = 200, body = EnvelopeBody))
)]
pub async fn increment_value(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let result = increment(&state, &ctx).await;
    ctx.respond(result)
}

async fn increment(state: &AppState, ctx: &RequestContext) -> PeerResult<()> {
    let amount = integer_param(ctx, "amount", 1)?;
    let default = integer_param(ctx, "default", 0)?;
    let address = ctx.peer_address()?;

    let value = state
        .storage
        .incr(&address.host, &address.path, amount, default)
        .await?;
    tracing::debug!(uri = %address.uri(), value, "incremented");
    Ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/storage/{address}",
    params(
        ("address" = String, Path, description = "`<host>/<path...>` on the peer"),
        ("data" = Option<String>, Query, description = "Value to store, default empty")
    ),
    tag = "Storage",
    responses((status = 200, body = EnvelopeBody))
)]
pub async fn write_value(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let result = write(&state, &ctx).await;
    ctx.respond(result)
}

async fn write(state: &AppState, ctx: &RequestContext) -> PeerResult<()> {
    let data = ctx.param_or("data", "").to_string();
    let address = ctx.peer_address()?;
    state.storage.set(&address.host, &address.path, data).await
}

fn integer_param(ctx: &RequestContext, name: &str, default: i64) -> PeerResult<i64> {
    match ctx.param(name) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| PeerError::invalid_parameter(name, format!("{raw:?}: {e}"))),
    }
}
