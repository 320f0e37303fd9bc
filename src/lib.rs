// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tint Web - HTTP/JSON gateway to a tint peer
//!
//! This crate exposes a peer's key-value storage, authorized key registry
//! and path-level permissions over HTTP. Every API response is a JSON
//! envelope `{success, reason?, ...}` written with `200 OK`.
//!
//! ## Modules
//!
//! - `api` - Resource handlers and the `/api/v1` router (Axum)
//! - `address` - `tint://host/path` addresses parsed from request paths
//! - `peer` - Collaborator traits and the in-memory peer
//! - `identity` - Public keys and the node key
//! - `site` - Site root: API, static files, docs

pub mod address;
pub mod api;
pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod models;
pub mod peer;
pub mod site;
pub mod state;
