// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Background timers tied to a screen's lifetime.
//!
//! Both timers run as spawned tasks owned by a handle. Dropping the handle
//! aborts the task, so a screen only has to keep the handle alive while it
//! is shown.

use crate::services::QuestApi;
use crate::session::{fetch_points, SessionStore};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Periodically refreshes the logged-in user's points.
///
/// Fetches immediately, then once per period. Each fetch is awaited before
/// the next tick is taken, so at most one request is in flight. The task ends
/// on its own when the session logs out or switches user.
pub struct PointsPoller {
    handle: JoinHandle<()>,
}

impl PointsPoller {
    /// Start polling for the current user. Returns `None` when logged out.
    pub fn start(
        api: Arc<dyn QuestApi>,
        session: SessionStore,
        period: Duration,
    ) -> Option<Self> {
        let user_id = session.user_id()?;
        let mut changes = session.subscribe();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!(
                user_id = %user_id,
                period_secs = period.as_secs(),
                "Points polling started"
            );

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let points = fetch_points(api.as_ref(), &user_id).await;
                        if !session.set_points_for(&user_id, points) {
                            break;
                        }
                    }
                    changed = changes.changed() => {
                        let still_ours = changed.is_ok()
                            && changes.borrow_and_update().user_id.as_deref()
                                == Some(user_id.as_str());
                        if !still_ours {
                            break;
                        }
                    }
                }
            }

            tracing::debug!(user_id = %user_id, "Points polling stopped");
        });

        Some(Self { handle })
    }

    /// True once the task has ended (logout, user switch, or `stop`).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop polling. A request in flight is abandoned.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for PointsPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Seconds since a screen was opened, ticking once per second.
///
/// Advisory only: the value is sent with a submission as metadata.
pub struct ElapsedTimer {
    seconds: Arc<AtomicU64>,
    handle: JoinHandle<()>,
}

impl ElapsedTimer {
    pub fn start() -> Self {
        let seconds = Arc::new(AtomicU64::new(0));
        let counter = seconds.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                counter.fetch_add(1, Ordering::Relaxed);
            }
        });

        Self { seconds, handle }
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.seconds.load(Ordering::Relaxed)
    }

    /// Elapsed time as `m:ss`.
    pub fn display(&self) -> String {
        crate::time_utils::format_elapsed(self.elapsed_secs())
    }
}

impl Drop for ElapsedTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
