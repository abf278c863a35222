// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Completed quests: the list, the results table, and participant photos.

use crate::models::{Participant, Quest, QuestDetails, QuestId};
use crate::services::{image, CapturedImage, QuestApi};
use crate::session::SessionStore;
use std::fmt;

/// Placeholder for a missing score or time.
pub const NOT_AVAILABLE: &str = "N/A";

/// Shown when a participant's photo cannot be loaded.
pub const NO_PHOTO: &str = "No photo available";

#[derive(Debug, Clone, Default)]
pub struct CompletedListView {
    pub quests: Vec<Quest>,
    /// Load error, shown in place of the list
    pub error: Option<String>,
}

impl CompletedListView {
    /// Load the logged-in user's completed quests.
    pub async fn load<A: QuestApi + ?Sized>(api: &A, session: &SessionStore) -> Self {
        let Some(user_id) = session.user_id() else {
            return Self::default();
        };

        match api.completed_quests(&user_id).await {
            Ok(quests) => Self {
                quests,
                error: None,
            },
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to load completed quests");
                Self {
                    quests: Vec::new(),
                    error: Some(e.user_message()),
                }
            }
        }
    }
}

impl fmt::Display for CompletedListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Completed Quests")?;
        if let Some(error) = &self.error {
            return writeln!(f, "{}", error);
        }
        if self.quests.is_empty() {
            return writeln!(f, "No completed quests available");
        }
        for quest in &self.quests {
            writeln!(f, "  #{:<6} {}  ({})", quest.quest_id, quest.host_id, quest.prompt)?;
        }
        Ok(())
    }
}

/// A results table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub user_id: String,
    pub score: String,
    pub time: String,
    pub is_winner: bool,
}

impl ParticipantRow {
    fn new(participant: &Participant, winner: Option<&str>) -> Self {
        let or_na = |v: Option<i64>| v.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string());
        Self {
            user_id: participant.user_id.clone(),
            score: or_na(participant.score),
            time: or_na(participant.time),
            is_winner: winner == Some(participant.user_id.as_str()),
        }
    }
}

/// Results of one completed quest.
#[derive(Debug, Clone)]
pub struct QuestReview {
    pub quest_id: QuestId,
    pub prompt: String,
    pub host_id: String,
    pub winner: Option<String>,
    pub rows: Vec<ParticipantRow>,
}

impl From<&QuestDetails> for QuestReview {
    fn from(details: &QuestDetails) -> Self {
        let winner = details.winning_participant().map(|p| p.user_id.clone());
        let rows = details
            .participants
            .iter()
            .map(|p| ParticipantRow::new(p, winner.as_deref()))
            .collect();

        Self {
            quest_id: details.quest_id,
            prompt: details.prompt.clone(),
            host_id: details.host_id.clone(),
            winner,
            rows,
        }
    }
}

impl QuestReview {
    /// Load a participant's photo for the detail dialog.
    pub async fn photo<A: QuestApi + ?Sized>(&self, api: &A, user_id: &str) -> PhotoView {
        let Some(row) = self.rows.iter().find(|r| r.user_id == user_id) else {
            return PhotoView::Unavailable {
                user_id: user_id.to_string(),
            };
        };

        match api.get_image(self.quest_id, user_id).await {
            Ok(Some(base64)) => PhotoView::Image {
                user_id: user_id.to_string(),
                data_uri: image::to_data_uri(&base64),
                score: row.score.clone(),
                time: row.time.clone(),
            },
            Ok(None) => PhotoView::Unavailable {
                user_id: user_id.to_string(),
            },
            Err(e) => {
                tracing::error!(
                    quest_id = self.quest_id,
                    user_id = %user_id,
                    error = %e,
                    "Failed to load photo"
                );
                PhotoView::Unavailable {
                    user_id: user_id.to_string(),
                }
            }
        }
    }
}

impl fmt::Display for QuestReview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prompt: {}", self.prompt)?;
        writeln!(f, "{:<20} {:>6} {:>9}", "User ID", "Score", "Time (s)")?;
        for row in &self.rows {
            let name = if row.is_winner {
                format!("{} 🏆", row.user_id)
            } else {
                row.user_id.clone()
            };
            writeln!(f, "{:<20} {:>6} {:>9}", name, row.score, row.time)?;
        }
        Ok(())
    }
}

/// Completed quest detail screen.
#[derive(Debug, Clone)]
pub enum CompletedQuestView {
    NotFound,
    Found(QuestReview),
}

impl CompletedQuestView {
    /// Load a completed quest. Any failure shows as not found.
    pub async fn load<A: QuestApi + ?Sized>(api: &A, quest_id: QuestId) -> Self {
        match api.quest_details(quest_id).await {
            Ok(details) => Self::Found(QuestReview::from(&details)),
            Err(e) => {
                tracing::error!(quest_id, error = %e, "Failed to load quest details");
                Self::NotFound
            }
        }
    }
}

impl fmt::Display for CompletedQuestView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletedQuestView::NotFound => writeln!(f, "{}", super::QUEST_NOT_FOUND),
            CompletedQuestView::Found(review) => fmt::Display::fmt(review, f),
        }
    }
}

/// Participant photo dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoView {
    Image {
        user_id: String,
        data_uri: String,
        score: String,
        time: String,
    },
    Unavailable {
        user_id: String,
    },
}

impl PhotoView {
    /// Decoded photo bytes, if there is a photo.
    pub fn bytes(&self) -> Option<Vec<u8>> {
        match self {
            PhotoView::Image { data_uri, .. } => CapturedImage::from_data_uri(data_uri)
                .and_then(|image| image.to_bytes())
                .ok(),
            PhotoView::Unavailable { .. } => None,
        }
    }
}

impl fmt::Display for PhotoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoView::Image {
                user_id,
                score,
                time,
                ..
            } => {
                writeln!(f, "{}'s Photo", user_id)?;
                writeln!(f, "Score: {}", score)?;
                writeln!(f, "Time: {}s", time)
            }
            PhotoView::Unavailable { user_id } => {
                writeln!(f, "{}'s Photo", user_id)?;
                writeln!(f, "{}", NO_PHOTO)
            }
        }
    }
}
