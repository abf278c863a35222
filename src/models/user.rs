// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User models for authentication and points.

use serde::{Deserialize, Serialize};

/// Point total shown when the server could not supply one.
pub const POINTS_UNKNOWN: i64 = -1;

/// Body for `/api/register` and `/api/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials<'a> {
    pub user_id: &'a str,
    pub password: &'a str,
}

/// Response from the auth endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub message: String,
    /// Echoed back by `/api/register`
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Response from `/api/get-points`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PointsResponse {
    pub points: i64,
}
