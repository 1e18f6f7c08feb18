// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Token authority library
//!
//! This library issues and refreshes short-lived bearer tokens (HS256 JWTs)
//! for a set of statically configured users, and serves them over JSON RPC
//! routes.

pub mod auth;
pub mod config;
pub mod rpc;
