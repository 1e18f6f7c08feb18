// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Token lifecycle: credential verification, issuance and refresh

/// Token issuance, verification and refresh
pub mod authority;

/// Claims embedded in issued tokens
pub mod claims;

/// Static username to secret mapping
pub mod credentials;

/// Unauthenticated / Internal error taxonomy
pub mod error;

pub use authority::{
    TokenAuthority, DEFAULT_TOKEN_LIFESPAN_SECS, MAX_TOKEN_LIFESPAN_SECS, MIN_TOKEN_LIFESPAN_MILLIS,
};
pub use claims::Claims;
pub use credentials::CredentialStore;
pub use error::{AuthError, RpcCode};
