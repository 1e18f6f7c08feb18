// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use token_authority::auth::{CredentialStore, TokenAuthority};
use token_authority::config::Config;

/// Verify a token and print its claims
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Token to inspect
    #[clap(long)]
    token: String,

    /// HMAC secret the token was signed with
    #[clap(long, conflicts_with = "config")]
    secret: Option<String>,

    /// Read the HMAC secret from this configuration file instead
    #[clap(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let secret = match (args.secret, args.config) {
        (Some(secret), _) => secret,
        (None, Some(path)) => {
            if !path.exists() {
                bail!("Configuration file {:?} does not exist", path);
            }
            Config::from_file(&path)
                .with_context(|| format!("Failed to load configuration from {:?}", path))?
                .access
                .hmac_secret
        }
        (None, None) => bail!("Either --secret or --config is required"),
    };

    let authority = TokenAuthority::new(secret.as_bytes(), CredentialStore::default());
    match authority.decode(&args.token) {
        Ok(claims) => {
            println!("Username:   {}", claims.username);
            match claims.expiry() {
                Some(expiry) => println!("Expires at: {}", expiry.to_rfc3339()),
                None => println!("Expires at: {} (out of range)", claims.expires_at),
            }
            println!("Valid for:  {} seconds", claims.validity_remaining_secs());
            Ok(())
        }
        Err(e) => bail!("Token rejected ({}): {}", e.code(), e),
    }
}
