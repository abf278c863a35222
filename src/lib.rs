// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Shutter Quest: a photo scavenger hunt client
//!
//! This crate provides a typed client for the Shutter Quest API, the session
//! and quest flows built on it, and text view-models for each screen.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;
pub mod time_utils;
pub mod views;

use config::Config;
use services::{QuestApi, QuestApiClient};
use session::SessionStore;
use std::sync::Arc;

/// Shared application state handed to every screen.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn QuestApi>,
    pub session: SessionStore,
}

impl AppState {
    /// State backed by the HTTP client for `config.api_url`.
    pub fn new(config: Config) -> error::Result<Self> {
        let api = QuestApiClient::from_config(&config)?;
        Ok(Self::with_api(config, Arc::new(api)))
    }

    /// State backed by any `QuestApi` implementation.
    pub fn with_api(config: Config, api: Arc<dyn QuestApi>) -> Self {
        Self {
            config,
            api,
            session: SessionStore::new(),
        }
    }

    /// Start refreshing points for the logged-in user at the configured period.
    pub fn start_points_polling(&self) -> Option<services::PointsPoller> {
        services::PointsPoller::start(
            self.api.clone(),
            self.session.clone(),
            self.config.points_refresh,
        )
    }
}
