// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Site root: the API, the static asset area and the API docs.

use std::path::Path;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    api::{self, ApiDoc},
    state::AppState,
};

/// Where `/` sends browsers.
pub const STATIC_ROOT: &str = "/static";

pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(redirect_to_static))
        .nest("/api", api::router(state))
        .nest_service(STATIC_ROOT, ServeDir::new(static_dir.as_ref()))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

async fn redirect_to_static() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, STATIC_ROOT)])
}
