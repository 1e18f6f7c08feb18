// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! User access configuration
//!
//! This module defines the signing secret, the token lifespan and the static
//! list of users allowed to authenticate.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::auth::{
    CredentialStore, TokenAuthority, DEFAULT_TOKEN_LIFESPAN_SECS, MAX_TOKEN_LIFESPAN_SECS,
};

/// User allowed to authenticate
///
/// # Fields
///
/// * `user` - The username used for authentication
/// * `pass` - The expected password, compared as-is
///
/// # Example
///
/// ```
/// use token_authority::config::User;
///
/// let user = User {
///     user: "user1".to_string(),
///     pass: "passwd".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// The username used for authentication
    pub user: String,

    /// Plaintext password
    pub pass: String,
}

/// Length of the signing secret generated for a default configuration
const GENERATED_SECRET_LEN: usize = 48;

/// Generate a random signing secret.
///
/// Only used by [`AccessConfig::default`], so each generated sample or
/// fallback configuration carries its own key. Files read from disk must
/// set `hmac_secret` explicitly.
fn generate_hmac_secret() -> String {
    use rand::Rng;
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}

fn default_duration() -> u64 {
    DEFAULT_TOKEN_LIFESPAN_SECS
}

/// Configuration for token signing and user access
///
/// # Example
///
/// ```rust
/// use token_authority::config::access::{AccessConfig, User};
///
/// let access_config = AccessConfig {
///     hmac_secret: "secret".to_string(),
///     duration: 600, // Token lifespan in seconds
///     users: vec![
///         User {
///             user: "user1".to_string(),
///             pass: "passwd".to_string(),
///         },
///         User {
///             user: "user2".to_string(),
///             pass: "otherpasswd".to_string(),
///         },
///     ],
/// };
/// let authority = access_config.token_authority();
/// assert!(authority.authenticate("user2", "otherpasswd").is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    /// HMAC secret used to sign and verify tokens, required in files
    pub hmac_secret: String,

    /// Token lifespan in seconds
    #[serde(default = "default_duration")]
    pub duration: u64,

    /// Users allowed to authenticate
    #[serde(default)]
    pub users: Vec<User>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            hmac_secret: generate_hmac_secret(),
            duration: default_duration(),
            users: Vec::new(),
        }
    }
}

impl AccessConfig {
    /// Build the credential store from the configured users
    pub fn credential_store(&self) -> CredentialStore {
        self.users
            .iter()
            .map(|u| (u.user.clone(), u.pass.clone()))
            .collect()
    }

    /// Token lifespan as a `Duration`, capped at [`MAX_TOKEN_LIFESPAN_SECS`]
    pub fn lifespan(&self) -> Duration {
        Duration::seconds(self.duration.min(MAX_TOKEN_LIFESPAN_SECS) as i64)
    }

    /// Build the token authority described by this configuration
    pub fn token_authority(&self) -> TokenAuthority {
        TokenAuthority::new(self.hmac_secret.as_bytes(), self.credential_store())
            .with_lifespan(self.lifespan())
    }
}
