// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Translation from HTTP paths to peer addresses.
//!
//! Storage and permission routes are catch-alls: everything after
//! `/api/v1/<resource>/` is an address in the peer's own naming scheme,
//! `tint://<host>/<path>`.
//!
//! Segments are counted on the original request path split on `/`, so the
//! leading empty segment is index 0:
//!
//! ```text
//! "" / api / v1 / storage / <host> / <path...>
//! 0    1     2    3         4        5..
//! ```

use url::Url;

use crate::error::{PeerError, PeerResult};

/// Scheme of peer addresses.
pub const TINT_SCHEME: &str = "tint";

/// Number of segments consumed by the router before an address begins.
pub const ADDRESS_OFFSET: usize = 4;

/// A storage location on a given peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAddress {
    pub host: String,
    /// Storage path, without a leading `/`.
    pub path: String,
}

impl PeerAddress {
    /// Parse `tint://host/path`.
    pub fn parse(uri: &str) -> PeerResult<Self> {
        let url = Url::parse(uri).map_err(|e| PeerError::malformed_address(format!("{uri}: {e}")))?;
        if url.scheme() != TINT_SCHEME {
            return Err(PeerError::malformed_address(format!(
                "{uri}: expected {TINT_SCHEME}:// scheme"
            )));
        }
        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(PeerError::malformed_address(format!("{uri}: missing host"))),
        };

        Ok(Self {
            host,
            path: url.path().trim_start_matches('/').to_string(),
        })
    }

    /// Join the segments following the router prefix into an address.
    pub fn from_segments(segments: &[String]) -> PeerResult<Self> {
        let rest = segments.get(ADDRESS_OFFSET..).unwrap_or_default();
        Self::parse(&format!("{TINT_SCHEME}://{}", rest.join("/")))
    }

    pub fn uri(&self) -> String {
        format!("{TINT_SCHEME}://{}/{}", self.host, self.path)
    }
}

/// Target of a permission request: `<user>/<permission path...>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTarget {
    pub user: String,
    pub permission: String,
}

impl PermissionTarget {
    pub fn from_segments(segments: &[String]) -> PeerResult<Self> {
        let user = match segments.get(ADDRESS_OFFSET) {
            Some(user) if !user.is_empty() => user.clone(),
            _ => return Err(PeerError::malformed_address("missing authorized user")),
        };
        let permission = segments
            .get(ADDRESS_OFFSET + 1..)
            .unwrap_or_default()
            .join("/");

        Ok(Self { user, permission })
    }
}

/// Split a request path the way the locator counts segments.
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/').map(str::to_string).collect()
}
