// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pending quests: the list, and opening one to complete it.

use crate::models::{Quest, QuestId};
use crate::services::{QuestApi, QuestFlow};
use crate::session::SessionStore;
use crate::time_utils::format_quest_date;
use std::fmt;

/// One row in the pending list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRow {
    pub quest_id: QuestId,
    pub host_id: String,
    /// e.g. `Jan 5, 2025`, when the server sent a date
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct PendingListView {
    pub rows: Vec<PendingRow>,
    /// Load error, shown in place of the list
    pub error: Option<String>,
}

impl PendingListView {
    /// Load the logged-in user's pending quests.
    ///
    /// Logged out gives an empty list without a request.
    pub async fn load<A: QuestApi + ?Sized>(api: &A, session: &SessionStore) -> Self {
        let Some(user_id) = session.user_id() else {
            return Self::default();
        };

        match api.pending_quests(&user_id).await {
            Ok(quests) => Self {
                rows: quests.iter().map(PendingRow::from).collect(),
                error: None,
            },
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to load pending quests");
                Self {
                    rows: Vec::new(),
                    error: Some(e.user_message()),
                }
            }
        }
    }
}

impl From<&Quest> for PendingRow {
    fn from(quest: &Quest) -> Self {
        Self {
            quest_id: quest.quest_id,
            host_id: quest.host_id.clone(),
            date: quest.date.and_then(format_quest_date),
        }
    }
}

impl fmt::Display for PendingListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pending Quests")?;
        if let Some(error) = &self.error {
            return writeln!(f, "{}", error);
        }
        if self.rows.is_empty() {
            return writeln!(f, "No pending quests available");
        }
        for row in &self.rows {
            write!(f, "  #{:<6} Invited By: {}", row.quest_id, row.host_id)?;
            if let Some(date) = &row.date {
                write!(f, "  {}", date)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Result of opening a pending quest.
#[derive(Debug)]
pub enum PendingQuestView {
    NotFound,
    Ready(QuestFlow),
}

impl PendingQuestView {
    /// Find `quest_id` among the user's pending quests and start a flow for it.
    pub async fn open<A: QuestApi + ?Sized>(
        api: &A,
        session: &SessionStore,
        quest_id: QuestId,
    ) -> Self {
        let Some(user_id) = session.user_id() else {
            return Self::NotFound;
        };

        match api.pending_quests(&user_id).await {
            Ok(quests) => match quests.iter().find(|q| q.quest_id == quest_id) {
                Some(quest) => Self::Ready(QuestFlow::for_completion(quest, &user_id)),
                None => Self::NotFound,
            },
            Err(e) => {
                tracing::error!(quest_id, error = %e, "Failed to load pending quest");
                Self::NotFound
            }
        }
    }
}
