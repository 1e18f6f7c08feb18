// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Error taxonomy of the token authority
//!
//! Every failure of [`TokenAuthority`](super::TokenAuthority) is one of two
//! kinds, mirroring the RPC status codes returned to callers:
//!
//! - [`AuthError::Unauthenticated`]: the caller could not prove its identity
//!   (bad credentials, bad signature, expired or otherwise rejected token)
//! - [`AuthError::Internal`]: the token could not be produced or parsed
//!   (signing failure, structurally malformed token)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message returned for every credential mismatch.
///
/// Unknown users and wrong passwords share this message so that callers
/// cannot tell which usernames exist.
pub const AUTHENTICATION_FAILED: &str = "failed to authenticate";

/// RPC status code attached to an [`AuthError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcCode {
    Unauthenticated,
    Internal,
}

impl RpcCode {
    /// Wire name of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcCode::Unauthenticated => "UNAUTHENTICATED",
            RpcCode::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for RpcCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by `authenticate` and `refresh`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Credentials or token were rejected
    #[error("{0}")]
    Unauthenticated(String),

    /// Token could not be signed or parsed
    #[error("{0}")]
    Internal(String),
}

impl AuthError {
    /// Credential mismatch, without saying which part was wrong
    pub fn authentication_failed() -> Self {
        AuthError::Unauthenticated(AUTHENTICATION_FAILED.to_string())
    }

    /// Status code for this error
    pub fn code(&self) -> RpcCode {
        match self {
            AuthError::Unauthenticated(_) => RpcCode::Unauthenticated,
            AuthError::Internal(_) => RpcCode::Internal,
        }
    }

    /// Human-readable message, without the code
    pub fn message(&self) -> &str {
        match self {
            AuthError::Unauthenticated(msg) | AuthError::Internal(msg) => msg,
        }
    }
}
