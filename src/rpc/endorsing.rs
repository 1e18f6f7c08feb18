// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Endorsement relay
//!
//! Placeholder for the block endorsement service. `Endorse` only logs the
//! received block hash and `EndorseStream` closes without sending anything.
//! Neither route touches the token authority.

use std::net::IpAddr;

use rocket::futures::stream::{self, Empty};
use rocket::response::stream::{Event, EventStream};
use rocket::serde::json::Json;
use rocket::{get, post};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endorsement {
    /// Hash of the block to endorse
    pub block: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndorsementResponse {}

#[post("/endorse", format = "json", data = "<input>")]
pub fn endorse(input: Json<Endorsement>, client: Option<IpAddr>) -> Json<EndorsementResponse> {
    let client = client.map(|ip| ip.to_string()).unwrap_or_default();
    log::info!(
        "Received endorsement. client={} blockhash={:?}",
        client,
        input.block
    );
    Json(EndorsementResponse::default())
}

/// Subscribe to endorsements; the stream currently ends immediately
#[get("/stream")]
pub fn endorse_stream() -> EventStream<Empty<Event>> {
    EventStream::from(stream::empty())
}
