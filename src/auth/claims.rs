// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Claims carried by every issued token

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Identity and expiry payload of a token
///
/// The structure is serialized to JSON as the JWT payload. It holds exactly
/// two fields: the authenticated principal and the registered `exp` claim,
/// so tokens stay small and carry no other user data.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Username of the authenticated principal
    pub username: String,

    /// Expiration timestamp
    ///
    /// Unix time (seconds since 1970-01-01T00:00:00Z UTC) after which the
    /// token must not be accepted.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Claims {
            username: username.into(),
            expires_at: expires_at.timestamp(),
        }
    }

    /// Expiry as a `DateTime`, `None` if the timestamp is out of range
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }

    /// Seconds left before expiry, 0 once expired
    pub fn validity_remaining_secs(&self) -> i64 {
        let now = Utc::now().timestamp();
        (self.expires_at - now).max(0)
    }
}
