// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory peer implementing every collaborator capability.
//!
//! Nothing is persisted or replicated: values written for a remote host stay
//! in this process. Good enough to serve the API standalone and to back the
//! tests.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{AccessControl, AuthorizedKey, KeyRegistry, KeyValueStore, PeerIdentity};
use crate::{
    error::{PeerError, PeerResult},
    identity::{NodeIdentity, PublicKey},
};

pub struct InMemoryPeer {
    identity: NodeIdentity,
    values: RwLock<HashMap<(String, String), Value>>,
    /// Registration name -> key.
    keys: RwLock<BTreeMap<String, PublicKey>>,
    /// User -> granted permission paths.
    grants: RwLock<HashMap<String, HashSet<String>>>,
}

impl InMemoryPeer {
    pub fn new(identity: NodeIdentity) -> Self {
        Self {
            identity,
            values: RwLock::default(),
            keys: RwLock::default(),
            grants: RwLock::default(),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryPeer {
    async fn get(&self, host: &str, path: &str) -> PeerResult<Option<Value>> {
        let values = self.values.read().await;
        Ok(values.get(&(host.to_string(), path.to_string())).cloned())
    }

    async fn set(&self, host: &str, path: &str, data: String) -> PeerResult<()> {
        let mut values = self.values.write().await;
        values.insert((host.to_string(), path.to_string()), Value::String(data));
        Ok(())
    }

    async fn incr(&self, host: &str, path: &str, amount: i64, default: i64) -> PeerResult<i64> {
        let mut values = self.values.write().await;
        let slot = (host.to_string(), path.to_string());

        let current = match values.get(&slot) {
            None => default,
            Some(value) => as_integer(value).ok_or_else(|| PeerError::NotAnInteger {
                host: host.to_string(),
                path: path.to_string(),
            })?,
        };
        let next = current.checked_add(amount).ok_or_else(|| PeerError::Overflow {
            host: host.to_string(),
            path: path.to_string(),
        })?;

        values.insert(slot, Value::from(next));
        Ok(next)
    }
}

/// Integers, and strings holding integers (as written by `set`).
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl KeyRegistry for InMemoryPeer {
    async fn authorized_keys(&self) -> PeerResult<Vec<AuthorizedKey>> {
        let keys = self.keys.read().await;
        Ok(keys
            .iter()
            .map(|(name, key)| AuthorizedKey {
                name: name.clone(),
                key: key.clone(),
            })
            .collect())
    }

    async fn authorize(&self, key: PublicKey, name: &str) -> PeerResult<()> {
        let mut keys = self.keys.write().await;
        if keys.values().any(|existing| existing.key_id() == key.key_id()) {
            return Err(PeerError::AlreadyAuthorized(key.key_id().to_string()));
        }
        if keys.contains_key(name) {
            return Err(PeerError::NameTaken(name.to_string()));
        }
        keys.insert(name.to_string(), key);
        Ok(())
    }
}

#[async_trait]
impl AccessControl for InMemoryPeer {
    async fn test_access(&self, user: &str, permission: &str) -> PeerResult<()> {
        let grants = self.grants.read().await;
        let allowed = grants
            .get(user)
            .is_some_and(|paths| paths.iter().any(|granted| covers(granted, permission)));

        if allowed {
            Ok(())
        } else {
            Err(PeerError::AccessDenied {
                user: user.to_string(),
                permission: permission.to_string(),
            })
        }
    }

    async fn grant_access(&self, user: &str, permission: &str) -> PeerResult<()> {
        let mut grants = self.grants.write().await;
        grants
            .entry(user.to_string())
            .or_default()
            .insert(permission.trim_matches('/').to_string());
        Ok(())
    }
}

/// A grant covers its own path and everything below it, segment-wise.
fn covers(granted: &str, requested: &str) -> bool {
    let requested = requested.trim_matches('/');
    if granted.is_empty() || granted == requested {
        return true;
    }
    requested
        .strip_prefix(granted)
        .is_some_and(|rest| rest.starts_with('/'))
}

impl PeerIdentity for InMemoryPeer {
    fn key_id(&self) -> String {
        self.identity.key_id().to_string()
    }

    fn public_key(&self) -> PublicKey {
        self.identity.public_key().clone()
    }
}
