// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session state: who is logged in and how many points they have.
//!
//! A `SessionStore` is the single source of truth for the current user. It is
//! cheap to clone and is handed to every screen that needs it. Updates are
//! published through a `watch` channel so long-lived tasks (points polling)
//! can react to logout.

use crate::error::{ClientError, Result};
use crate::models::POINTS_UNKNOWN;
use crate::services::QuestApi;
use tokio::sync::{broadcast, watch};

/// Snapshot of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<String>,
    pub points: i64,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Emitted when a user's point total goes up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsIncreased {
    pub user_id: String,
    pub previous: i64,
    pub current: i64,
}

/// Shared session store.
#[derive(Clone)]
pub struct SessionStore {
    state: watch::Sender<Session>,
    increases: broadcast::Sender<PointsIncreased>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Session::default());
        let (increases, _) = broadcast::channel(16);
        Self { state, increases }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.state.borrow().user_id.clone()
    }

    pub fn points(&self) -> i64 {
        self.state.borrow().points
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// The logged-in user, or `NotAuthenticated`.
    pub fn require_user(&self) -> Result<String> {
        self.user_id().ok_or(ClientError::NotAuthenticated)
    }

    /// Watch session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Receive point increase notifications.
    pub fn subscribe_increases(&self) -> broadcast::Receiver<PointsIncreased> {
        self.increases.subscribe()
    }

    /// Start a session for `user_id`. Points start at zero until refreshed.
    pub fn login(&self, user_id: &str) {
        self.state.send_replace(Session {
            user_id: Some(user_id.to_string()),
            points: 0,
        });
        tracing::info!(user_id = %user_id, "Session started");
    }

    /// Clear the session.
    pub fn logout(&self) {
        let previous = self.state.send_replace(Session::default());
        if let Some(user_id) = previous.user_id {
            tracing::info!(user_id = %user_id, "Session cleared");
        }
    }

    /// Set the current user's point total.
    ///
    /// Ignored when nobody is logged in.
    pub fn set_points(&self, points: i64) {
        if let Some(user_id) = self.user_id() {
            self.set_points_for(&user_id, points);
        }
    }

    /// Set points only if `user_id` is still the logged-in user.
    ///
    /// Returns false when the write was dropped. A refresh that resolves
    /// after logout or a user switch must not touch the new session.
    pub fn set_points_for(&self, user_id: &str, points: i64) -> bool {
        let mut previous = None;
        let applied = self.state.send_if_modified(|session| {
            if session.user_id.as_deref() != Some(user_id) || session.points == points {
                return false;
            }
            previous = Some(session.points);
            session.points = points;
            true
        });

        if let Some(previous) = previous {
            // The sentinel is not a real total, so leaving it is not a gain
            if points > previous && previous != POINTS_UNKNOWN {
                // No receivers is fine
                let _ = self.increases.send(PointsIncreased {
                    user_id: user_id.to_string(),
                    previous,
                    current: points,
                });
            }
        }
        applied || self.state.borrow().user_id.as_deref() == Some(user_id)
    }

    /// Check credentials with the server and start a session.
    pub async fn sign_in<A: QuestApi + ?Sized>(
        &self,
        api: &A,
        user_id: &str,
        password: &str,
    ) -> Result<()> {
        let user_id = user_id.trim();
        if user_id.is_empty() || password.is_empty() {
            return Err(ClientError::InvalidInput(
                "userID and password are required".to_string(),
            ));
        }
        api.login(user_id, password).await?;
        self.login(user_id);
        Ok(())
    }

    /// Create an account, then sign in with it.
    pub async fn sign_up<A: QuestApi + ?Sized>(
        &self,
        api: &A,
        user_id: &str,
        password: &str,
    ) -> Result<()> {
        let user_id = user_id.trim();
        if user_id.is_empty() || password.is_empty() {
            return Err(ClientError::InvalidInput(
                "userID and password are required".to_string(),
            ));
        }
        api.register(user_id, password).await?;
        self.sign_in(api, user_id, password).await
    }

    /// Fetch the current user's points from the server and store them.
    ///
    /// Never fails: any error is logged and recorded as `POINTS_UNKNOWN`.
    /// Returns the value fetched, or `POINTS_UNKNOWN` when logged out.
    pub async fn refresh_points<A: QuestApi + ?Sized>(&self, api: &A) -> i64 {
        let Some(user_id) = self.user_id() else {
            return POINTS_UNKNOWN;
        };
        let points = fetch_points(api, &user_id).await;
        self.set_points_for(&user_id, points);
        points
    }
}

/// Point total for `user_id`, or `POINTS_UNKNOWN` on any failure.
pub async fn fetch_points<A: QuestApi + ?Sized>(api: &A, user_id: &str) -> i64 {
    match api.get_points(user_id).await {
        Ok(points) => points,
        Err(e) => {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to fetch points");
            POINTS_UNKNOWN
        }
    }
}
