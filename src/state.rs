// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    identity::NodeIdentity,
    peer::{AccessControl, InMemoryPeer, KeyRegistry, KeyValueStore, PeerIdentity},
};

/// Collaborators shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn KeyValueStore>,
    pub keys: Arc<dyn KeyRegistry>,
    pub acl: Arc<dyn AccessControl>,
    pub identity: Arc<dyn PeerIdentity>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        keys: Arc<dyn KeyRegistry>,
        acl: Arc<dyn AccessControl>,
        identity: Arc<dyn PeerIdentity>,
    ) -> Self {
        Self {
            storage,
            keys,
            acl,
            identity,
        }
    }

    /// Use one peer object for all four capabilities.
    pub fn from_peer<P>(peer: Arc<P>) -> Self
    where
        P: KeyValueStore + KeyRegistry + AccessControl + PeerIdentity + 'static,
    {
        Self {
            storage: peer.clone(),
            keys: peer.clone(),
            acl: peer.clone(),
            identity: peer,
        }
    }

    pub fn in_memory(identity: NodeIdentity) -> Self {
        Self::from_peer(Arc::new(InMemoryPeer::new(identity)))
    }
}
