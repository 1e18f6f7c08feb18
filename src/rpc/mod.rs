// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! RPC surface
//!
//! JSON-over-HTTP routes served by Rocket:
//!
//! - `POST /v1/auth/authenticate`
//! - `POST /v1/auth/refresh`
//! - `POST /v1/endorsing/endorse`
//! - `GET /v1/endorsing/stream`
//! - `GET /health`

pub mod authentication;
pub mod endorsing;
pub mod server;
pub mod status;

pub use server::{build_rocket, figment};
