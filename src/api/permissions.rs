// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path-level permission endpoints: `/api/v1/permissions/<user>/<path...>`.

use axum::{extract::State, response::Response};

use super::context::RequestContext;
use crate::{address::PermissionTarget, error::PeerResult, models::EnvelopeBody, state::AppState};

#[utoipa::path(
    get,
    path = "/api/v1/permissions/{user}/{permission}",
    params(
        ("user" = String, Path, description = "Authorized user"),
        ("permission" = String, Path, description = "Permission path, may contain `/`")
    ),
    tag = "Permissions",
    responses((status = 200, description = "Success when the user has access", body = EnvelopeBody))
)]
pub async fn test_access(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let result = match target(&ctx) {
        Ok(target) => state.acl.test_access(&target.user, &target.permission).await,
        Err(e) => Err(e),
    };
    ctx.respond(result)
}

#[utoipa::path(
    post,
    path = "/api/v1/permissions/{user}/{permission}",
    params(
        ("user" = String, Path, description = "Authorized user"),
        ("permission" = String, Path, description = "Permission path, may contain `/`")
    ),
    tag = "Permissions",
    responses((status = 200, body = EnvelopeBody))
)]
pub async fn grant_access(State(state): State<AppState>, ctx: RequestContext) -> Response {
    let result = match target(&ctx) {
        Ok(target) => {
            let granted = state.acl.grant_access(&target.user, &target.permission).await;
            if granted.is_ok() {
                tracing::info!(user = %target.user, permission = %target.permission, "access granted");
            }
            granted
        }
        Err(e) => Err(e),
    };
    ctx.respond(result)
}

fn target(ctx: &RequestContext) -> PeerResult<PermissionTarget> {
    // TODO: reject users whose id is not in the authorized key registry.
    ctx.permission_target()
}
