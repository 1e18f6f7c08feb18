// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use rocket::config::LogLevel;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::serde::json::Json;
use rocket::{catchers, get, routes, Build, Request, Response, Rocket};
use serde::{Deserialize, Serialize};

use super::authentication::{authenticate, refresh};
use super::endorsing::{endorse, endorse_stream};
use super::status::default_catcher;
use crate::config::Config;

/// Logs every answered call with its status
pub struct RequestLogger;

#[rocket::async_trait]
impl Fairing for RequestLogger {
    fn info(&self) -> Info {
        Info {
            name: "Log RPC calls",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let status = response.status();
        if status.code >= 500 {
            log::error!("{} {} -> {}", request.method(), request.uri(), status);
        } else {
            log::info!("{} {} -> {}", request.method(), request.uri(), status);
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
}

/// Liveness check
#[get("/health")]
fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Rocket figment for the server section of the configuration
pub fn figment(config: &Config) -> Figment {
    rocket::Config::figment()
        .merge(("ident", config.server.name.clone()))
        .merge(("limits", Limits::new().limit("json", 64.kibibytes())))
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port))
        .merge(("log_level", LogLevel::Normal))
}

/// Build the RPC server
///
/// The token authority is created from the `access` section and shared by
/// all routes as managed state. The endorsement routes are mounted only when
/// `endorsing.enabled` is set.
pub fn build_rocket(figment: Figment, config: &Config) -> Rocket<Build> {
    let authority = config.token_authority();
    log::info!(
        "Token authority ready: {} users, tokens valid for {}s",
        authority.credentials().len(),
        authority.lifespan().num_seconds()
    );

    let rocket = rocket::custom(figment)
        .attach(RequestLogger)
        .mount("/", routes![health])
        .mount("/v1/auth", routes![authenticate, refresh])
        .register("/", catchers![default_catcher])
        .manage(authority);

    if config.endorsing.enabled {
        rocket.mount("/v1/endorsing", routes![endorse, endorse_stream])
    } else {
        log::info!("Endorsement relay disabled");
        rocket
    }
}
