// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Public keys and the local node identity.
//!
//! Peers identify each other by secp256k1 public keys exchanged as SPKI PEM.
//! This module only parses, re-encodes and fingerprints key material; it
//! never signs or verifies anything.

use std::fmt::{self, Write as _};
use std::path::Path;
use std::str::FromStr;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey, LineEnding};
use k256::SecretKey;
use rand_core::OsRng;
use sha2::{Digest, Sha256};

use crate::error::PeerError;

/// A peer's public key, held as its canonical PEM form and key id.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    canonical: String,
    id: String,
}

impl PublicKey {
    pub fn from_k256(key: k256::PublicKey) -> Result<Self, PeerError> {
        let canonical = key
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| PeerError::InvalidKey(e.to_string()))?;
        let digest = Sha256::digest(key.to_encoded_point(true).as_bytes());
        Ok(Self {
            canonical,
            id: to_hex(&digest),
        })
    }

    /// Hex SHA-256 fingerprint of the compressed point.
    pub fn key_id(&self) -> &str {
        &self.id
    }
}

impl FromStr for PublicKey {
    type Err = PeerError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PeerError::InvalidKey("no key material".to_string()));
        }
        let key = k256::PublicKey::from_public_key_pem(raw)
            .map_err(|e| PeerError::InvalidKey(e.to_string()))?;
        Self::from_k256(key)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.id).finish()
    }
}

/// Failure to load the node's own key.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Failed to read node key: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid PEM: {0}")]
    Pem(String),
    #[error("Invalid key format: {0}")]
    Key(String),
}

/// The local peer's identity, derived from its secret key.
///
/// Only the public half is kept: this node never signs anything.
pub struct NodeIdentity {
    public: PublicKey,
}

impl NodeIdentity {
    pub fn from_secret(secret: SecretKey) -> Result<Self, IdentityError> {
        let public = PublicKey::from_k256(secret.public_key())
            .map_err(|e| IdentityError::Key(e.to_string()))?;
        Ok(Self { public })
    }

    /// Fresh random identity, used when no key file is configured.
    pub fn generate() -> Result<Self, IdentityError> {
        Self::from_secret(SecretKey::random(&mut OsRng))
    }

    /// Parse a SEC1 (`EC PRIVATE KEY`) or PKCS#8 (`PRIVATE KEY`) PEM document.
    pub fn from_pem(pem_str: &str) -> Result<Self, IdentityError> {
        let pem = pem::parse(pem_str).map_err(|e| IdentityError::Pem(e.to_string()))?;
        let secret = SecretKey::from_sec1_der(pem.contents())
            .or_else(|_| SecretKey::from_pkcs8_der(pem.contents()).map_err(|e| e.to_string()))
            .map_err(IdentityError::Key)?;
        Self::from_secret(secret)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, IdentityError> {
        let pem_str = std::fs::read_to_string(path)?;
        Self::from_pem(&pem_str)
    }

    pub fn key_id(&self) -> &str {
        self.public.key_id()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

impl fmt::Debug for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeIdentity")
            .field("key_id", &self.key_id())
            .finish_non_exhaustive()
    }
}

fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}
