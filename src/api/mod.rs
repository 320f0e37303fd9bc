// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use utoipa::OpenApi;

use crate::{
    models::{EnvelopeBody, KeysResponse, ValueResponse},
    peer::KeyEntry,
    state::AppState,
};

pub mod context;
pub mod envelope;
pub mod keys;
pub mod permissions;
pub mod storage;

pub use context::RequestContext;
pub use envelope::Envelope;

/// Routes mounted under `/api`.
///
/// Storage and permission routes capture the rest of the path as an opaque
/// address; handlers re-read it from the original URI, so this router must be
/// nested at `/api` for the address offset to hold. The bare and trailing-slash
/// forms are routed too so that they get a malformed-address envelope.
pub fn router(state: AppState) -> Router {
    let storage_routes = get(storage::read_value)
        .put(storage::increment_value)
        .post(storage::write_value);
    let permission_routes = get(permissions::test_access).post(permissions::grant_access);

    let v1_routes = Router::new()
        .route("/keys", get(keys::list_keys).post(keys::authorize_key))
        .route("/storage", storage_routes.clone())
        .route("/storage/", storage_routes.clone())
        .route("/storage/{*address}", storage_routes)
        .route("/permissions", permission_routes.clone())
        .route("/permissions/", permission_routes.clone())
        .route("/permissions/{*target}", permission_routes)
        .with_state(state);

    Router::new().nest("/v1", v1_routes)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        keys::list_keys,
        keys::authorize_key,
        storage::read_value,
        storage::increment_value,
        storage::write_value,
        permissions::test_access,
        permissions::grant_access
    ),
    components(schemas(EnvelopeBody, KeysResponse, KeyEntry, ValueResponse)),
    tags(
        (name = "Keys", description = "Authorized key registry"),
        (name = "Storage", description = "Key-value storage on local and remote peers"),
        (name = "Permissions", description = "Path-level access control")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::test_keys::identity;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::in_memory(identity(1)));
        let _ = app.into_make_service();
    }

    #[test]
    fn openapi_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.contains(&"/api/v1/keys".to_string()));
        assert!(paths.contains(&"/api/v1/storage/{address}".to_string()));
        assert!(paths.contains(&"/api/v1/permissions/{user}/{permission}".to_string()));
    }
}
