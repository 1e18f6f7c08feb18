// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! This module provides utility functions for working with configuration
//! settings, including validation and schema management.

use std::collections::HashSet;

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{Config, CONFIG_SCHEMA, MAX_TOKEN_LIFESPAN_SECS};

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./token_authority --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Check if a string is a valid IP address
///
/// Accepts IPv4 and IPv6 addresses plus a few special values like
/// "localhost".
pub fn is_valid_ip_address(addr: &str) -> bool {
    if addr.parse::<std::net::IpAddr>().is_ok() {
        return true;
    }

    matches!(addr, "localhost" | "::" | "::0" | "0.0.0.0")
}

/// Validates the configuration against rules the JSON schema cannot express.
///
/// # Validation Rules
///
/// - **Signing secret**: must not be empty
/// - **Token lifespan**: between 1 second and [`MAX_TOKEN_LIFESPAN_SECS`]
/// - **Port Range**: 1-65534
/// - **Users**: usernames must be non-empty and unique
///
/// An address that does not parse as an IP is only reported as a warning.
pub fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    if config.access.hmac_secret.is_empty() {
        anyhow::bail!("HMAC secret must not be empty");
    }

    if config.access.duration == 0 || config.access.duration > MAX_TOKEN_LIFESPAN_SECS {
        anyhow::bail!(
            "Invalid token lifespan: {}s (expected 1 to {})",
            config.access.duration,
            MAX_TOKEN_LIFESPAN_SECS
        );
    }

    if config.server.port < 1 || config.server.port > 65534 {
        anyhow::bail!("Invalid port number: {}", config.server.port);
    }

    if !is_valid_ip_address(&config.server.address) {
        warn!(
            "Potentially invalid address format: {}",
            config.server.address
        );
    }

    let mut seen = HashSet::new();
    for user in &config.access.users {
        if user.user.is_empty() {
            anyhow::bail!("User name must not be empty");
        }
        if !seen.insert(user.user.as_str()) {
            anyhow::bail!("Duplicate user: {}", user.user);
        }
    }

    if config.access.users.is_empty() {
        warn!("No users configured, every authentication will fail");
    }

    Ok(())
}
