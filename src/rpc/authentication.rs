// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! `Authenticate` and `Refresh` RPCs
//!
//! Both calls answer `{"token": "..."}` on success. Failures are answered
//! with an [`RpcStatus`](super::status::RpcStatus) body and status 401
//! (`UNAUTHENTICATED`) or 500 (`INTERNAL`).

use rocket::serde::json::Json;
use rocket::{post, State};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, TokenAuthority};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshInput {
    pub token: String,
}

/// Response of both RPCs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Exchange a username and password for a token
#[post("/authenticate", format = "json", data = "<input>")]
pub fn authenticate(
    authority: &State<TokenAuthority>,
    input: Json<AuthenticateInput>,
) -> Result<Json<TokenResponse>, AuthError> {
    let token = authority.authenticate(&input.username, &input.password)?;
    Ok(Json(TokenResponse { token }))
}

/// Exchange a valid token for a new one with a renewed expiry
#[post("/refresh", format = "json", data = "<input>")]
pub fn refresh(
    authority: &State<TokenAuthority>,
    input: Json<RefreshInput>,
) -> Result<Json<TokenResponse>, AuthError> {
    let token = authority.refresh(&input.token).map_err(|e| {
        log::warn!("Token refresh rejected ({}): {}", e.code(), e);
        e
    })?;
    Ok(Json(TokenResponse { token }))
}
