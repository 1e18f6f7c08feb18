// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use token_authority::config::Config;
use token_authority::rpc::build_rocket;

fn get_test_figment() -> rocket::figment::Figment {
    rocket::Config::figment()
        .merge(("port", 0))
        .merge(("address", "127.0.0.1"))
        .merge(("log_level", rocket::config::LogLevel::Off))
}

async fn client(config: &Config) -> Client {
    Client::tracked(build_rocket(get_test_figment(), config))
        .await
        .expect("valid rocket instance")
}

#[rocket::async_test]
async fn test_endorse_returns_empty_response() {
    let client = client(&Config::default()).await;

    let response = client
        .post("/v1/endorsing/endorse")
        .header(ContentType::JSON)
        .body(r#"{"block": "BLockGenesisGenesisGenesisGenesisGenesisf79b5d1CoW2"}"#)
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().await.unwrap(), "{}");
}

#[rocket::async_test]
async fn test_endorse_stream_is_empty() {
    let client = client(&Config::default()).await;

    let response = client.get("/v1/endorsing/stream").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::EventStream));
    let body = response.into_string().await.unwrap_or_default();
    assert!(!body.contains("data:"));
}

#[rocket::async_test]
async fn test_endorsing_can_be_disabled() {
    let mut config = Config::default();
    config.endorsing.enabled = false;
    let client = client(&config).await;

    let response = client
        .post("/v1/endorsing/endorse")
        .header(ContentType::JSON)
        .body(r#"{"block": "B1"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::NotFound);
}
