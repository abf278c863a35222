// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Invite list for a quest being created.

use crate::services::QuestApi;

/// Why an invite was refused. The display strings are shown inline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InviteError {
    #[error("Please enter a user ID")]
    Blank,

    #[error("User already added")]
    Duplicate,

    #[error("You are already in this quest")]
    IsHost,

    #[error("User does not exist")]
    UnknownUser,

    #[error("Error checking user")]
    Lookup(String),
}

/// Invited user ids in insertion order, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct InviteList {
    host_id: Option<String>,
    users: Vec<String>,
}

impl InviteList {
    /// Invite list for a quest hosted by `host_id`.
    pub fn for_host(host_id: &str) -> Self {
        Self {
            host_id: Some(host_id.to_string()),
            users: Vec::new(),
        }
    }

    pub fn users(&self) -> &[String] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.users.iter().any(|u| u == user_id)
    }

    /// Validate locally, confirm the user exists, then append.
    ///
    /// The list is unchanged on any error. Local checks run first so a
    /// rejected candidate never costs a request.
    pub async fn add<A: QuestApi + ?Sized>(
        &mut self,
        api: &A,
        candidate: &str,
    ) -> Result<(), InviteError> {
        let user_id = candidate.trim();
        if user_id.is_empty() {
            return Err(InviteError::Blank);
        }
        if self.contains(user_id) {
            return Err(InviteError::Duplicate);
        }
        if self.host_id.as_deref() == Some(user_id) {
            return Err(InviteError::IsHost);
        }

        match api.user_exists(user_id).await {
            Ok(true) => {
                self.users.push(user_id.to_string());
                tracing::debug!(user_id = %user_id, total = self.users.len(), "Invited user");
                Ok(())
            }
            Ok(false) => Err(InviteError::UnknownUser),
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Error checking user");
                Err(InviteError::Lookup(e.to_string()))
            }
        }
    }

    /// Remove an invitee. Removing an id that is not listed does nothing.
    pub fn remove(&mut self, user_id: &str) {
        self.users.retain(|u| u != user_id);
    }

    pub fn into_users(self) -> Vec<String> {
        self.users
    }
}
