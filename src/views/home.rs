// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Main menu with the adventurer's status panel.

use crate::models::POINTS_UNKNOWN;
use crate::session::SessionStore;
use std::fmt;

/// Menu entries, in display order.
pub const MENU: [&str; 3] = ["Create Quest", "Pending Quests", "Completed Quests"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub user_id: Option<String>,
    pub points: i64,
}

impl HomeView {
    pub fn from_session(session: &SessionStore) -> Self {
        let snapshot = session.snapshot();
        Self {
            user_id: snapshot.user_id,
            points: snapshot.points,
        }
    }

    pub fn points_label(&self) -> String {
        if self.points == POINTS_UNKNOWN {
            "-- Gold Points".to_string()
        } else {
            format!("{} Gold Points", self.points)
        }
    }
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shutter Quest")?;
        if let Some(user_id) = &self.user_id {
            writeln!(f, "Adventurer: {}", user_id)?;
            writeln!(f, "{}", self.points_label())?;
        }
        for entry in MENU {
            writeln!(f, "  - {}", entry)?;
        }
        Ok(())
    }
}
