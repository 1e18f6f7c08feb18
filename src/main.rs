// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Main entry point for the token authority server
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use token_authority::config::{output_config_schema, validate_specific_rules, Config};
use token_authority::rpc::{build_rocket, figment};

/// Issues and refreshes short-lived bearer tokens
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (YAML), created with defaults if missing
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Server address, overrides server.address
    #[arg(short, long)]
    address: Option<String>,

    /// Server port, overrides server.port
    #[arg(short, long)]
    port: Option<u16>,

    /// HMAC secret used to sign tokens, overrides access.hmac_secret
    #[arg(long, env = "TOKEN_AUTHORITY_HMAC_SECRET", hide_env_values = true)]
    hmac_secret: Option<String>,

    /// Token lifespan in seconds, overrides access.duration
    #[arg(long)]
    token_lifespan: Option<u64>,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    show_config_schema: bool,
}

#[rocket::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.show_config_schema {
        return output_config_schema();
    }

    let mut config = Config::from_file(&args.config)
        .with_context(|| format!("Failed to load configuration from {:?}", args.config))?;
    config.apply_args(
        args.address,
        args.port,
        args.hmac_secret,
        args.token_lifespan,
    );
    validate_specific_rules(&config).context("Invalid command line override")?;

    log::info!(
        "Starting token authority on {}:{}",
        config.server.address,
        config.server.port
    );

    let rocket = build_rocket(figment(&config), &config);
    rocket.launch().await?;

    Ok(())
}
