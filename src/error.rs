// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error type shared by the locator and every peer collaborator.
//!
//! Handlers never turn these into HTTP status codes. The `Display` form of a
//! [`PeerError`] is what clients see as the envelope's `reason`.

/// Failure of an address lookup or a call into the peer server.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeerError {
    /// The request path does not name a `tint://host/path` address.
    #[error("Malformed address: {0}")]
    MalformedAddress(String),

    /// Key material could not be parsed.
    #[error("Invalid public key: {0}")]
    InvalidKey(String),

    /// The key id is already present in the authorized key registry.
    #[error("Key already authorized: {0}")]
    AlreadyAuthorized(String),

    /// The registration name is bound to a different key.
    #[error("Key name already in use: {0}")]
    NameTaken(String),

    /// A request parameter could not be interpreted.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// `incr` was applied to a value that is not an integer.
    #[error("Value at {host}/{path} is not an integer")]
    NotAnInteger { host: String, path: String },

    /// `incr` would leave the 64-bit range.
    #[error("Increment overflows value at {host}/{path}")]
    Overflow { host: String, path: String },

    /// The access-control list rejected the request.
    #[error("Access denied: {user} may not access {permission}")]
    AccessDenied { user: String, permission: String },

    /// The peer (or the remote peer it forwards to) could not be reached.
    #[error("Peer unavailable: {0}")]
    Unavailable(String),
}

impl PeerError {
    pub fn malformed_address(message: impl Into<String>) -> Self {
        Self::MalformedAddress(message.into())
    }

    pub fn invalid_parameter(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this failure is caused by the peer rather than by the request.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Result type for peer collaborator calls.
pub type PeerResult<T> = Result<T, PeerError>;
