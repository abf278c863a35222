// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Invite screen that precedes quest creation.

use crate::error::Result;
use crate::services::{InviteList, QuestApi, QuestFlow};
use crate::session::SessionStore;
use std::fmt;

/// "Invite Friends" screen.
#[derive(Debug, Clone)]
pub struct CreateQuestView {
    host_id: String,
    invites: InviteList,
    /// Inline error from the last add attempt
    error: Option<String>,
}

impl CreateQuestView {
    /// Open the screen for the logged-in user.
    pub fn new(session: &SessionStore) -> Result<Self> {
        let host_id = session.require_user()?;
        Ok(Self {
            invites: InviteList::for_host(&host_id),
            host_id,
            error: None,
        })
    }

    pub fn invited(&self) -> &[String] {
        self.invites.users()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Try to invite `candidate`; on refusal the reason is kept for display.
    pub async fn add_invite<A: QuestApi + ?Sized>(&mut self, api: &A, candidate: &str) -> bool {
        match self.invites.add(api, candidate).await {
            Ok(()) => {
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn remove_invite(&mut self, user_id: &str) {
        self.invites.remove(user_id);
    }

    /// Confirm and move on to the timed creation screen.
    pub async fn start<A: QuestApi + ?Sized>(self, api: &A) -> QuestFlow {
        QuestFlow::for_creation(api, &self.host_id, self.invites.into_users()).await
    }
}

impl fmt::Display for CreateQuestView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Invite Friends")?;
        for user_id in self.invites.users() {
            writeln!(f, "  {}", user_id)?;
        }
        if let Some(error) = &self.error {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}
