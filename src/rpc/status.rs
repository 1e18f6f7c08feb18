// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the token-authority project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Error bodies returned by the RPC routes

use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::{catch, Request};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, RpcCode};

/// JSON body of a failed call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcStatus {
    /// `UNAUTHENTICATED` or `INTERNAL`
    pub code: RpcCode,
    pub message: String,
}

impl From<&AuthError> for RpcStatus {
    fn from(err: &AuthError) -> Self {
        RpcStatus {
            code: err.code(),
            message: err.message().to_string(),
        }
    }
}

/// HTTP status carrying an RPC code
pub fn http_status(code: RpcCode) -> Status {
    match code {
        RpcCode::Unauthenticated => Status::Unauthorized,
        RpcCode::Internal => Status::InternalServerError,
    }
}

impl<'r> Responder<'r, 'static> for AuthError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = http_status(self.code());
        status::Custom(status, Json(RpcStatus::from(&self))).respond_to(request)
    }
}

/// Body of requests rejected before reaching a route (bad JSON, unknown path)
#[derive(Debug, Serialize, Deserialize)]
pub struct RequestError {
    pub status: u16,
    pub message: String,
}

#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> Json<RequestError> {
    Json(RequestError {
        status: status.code,
        message: status.reason().unwrap_or("Unknown error").to_string(),
    })
}
