// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Endorsement relay configuration

use serde::{Deserialize, Serialize};

/// Settings of the endorsement relay routes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndorsingConfig {
    /// Mount the `/v1/endorsing` routes
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for EndorsingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}
