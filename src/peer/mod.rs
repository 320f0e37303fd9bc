// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Peer Server Collaborators
//!
//! The HTTP layer owns no data. Everything it serves comes from the peer
//! server, reached through four narrow capabilities:
//!
//! - [`KeyValueStore`] - `get` / `set` / `incr` on `(host, path)` addresses
//! - [`KeyRegistry`] - the list of authorized public keys
//! - [`AccessControl`] - path-level permissions per authorized user
//! - [`PeerIdentity`] - this node's own key
//!
//! Handlers hold each capability behind its own `Arc<dyn ...>` so tests can
//! swap any one of them for a fake. [`memory::InMemoryPeer`] implements all
//! four and is what the binary serves by default.
//!
//! Implementations are responsible for their own synchronization; concurrent
//! `incr` calls on the same address must not lose updates.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::{error::PeerResult, identity::PublicKey};

pub mod memory;

pub use memory::InMemoryPeer;

/// A registered public key and the name it was registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedKey {
    pub name: String,
    pub key: PublicKey,
}

/// Wire form of a key: its id and canonical string.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
pub struct KeyEntry {
    /// Hex SHA-256 fingerprint of the key.
    pub id: String,
    /// Canonical PEM encoding.
    pub key: String,
}

impl From<&PublicKey> for KeyEntry {
    fn from(key: &PublicKey) -> Self {
        Self {
            id: key.key_id().to_string(),
            key: key.to_string(),
        }
    }
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value at `path` on `host`. `Ok(None)` means absent.
    async fn get(&self, host: &str, path: &str) -> PeerResult<Option<Value>>;

    /// Overwrite the value at `path` on `host`.
    async fn set(&self, host: &str, path: &str, data: String) -> PeerResult<()>;

    /// Atomically add `amount`, starting from `default` when absent.
    /// Returns the new value.
    async fn incr(&self, host: &str, path: &str, amount: i64, default: i64) -> PeerResult<i64>;
}

#[async_trait]
pub trait KeyRegistry: Send + Sync {
    async fn authorized_keys(&self) -> PeerResult<Vec<AuthorizedKey>>;

    async fn authorize(&self, key: PublicKey, name: &str) -> PeerResult<()>;
}

#[async_trait]
pub trait AccessControl: Send + Sync {
    /// Succeeds when `user` may access `permission`.
    async fn test_access(&self, user: &str, permission: &str) -> PeerResult<()>;

    async fn grant_access(&self, user: &str, permission: &str) -> PeerResult<()>;
}

pub trait PeerIdentity: Send + Sync {
    fn key_id(&self) -> String;

    fn public_key(&self) -> PublicKey;
}
