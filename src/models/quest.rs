// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest models as served by the API.

use crate::services::winner;
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned quest identifier.
pub type QuestId = i64;

/// Quest summary returned by the pending/completed list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub quest_id: QuestId,
    pub prompt: String,
    pub host_id: String,
    /// Creation time (Unix seconds); the list endpoints may leave it out
    #[serde(default)]
    pub date: Option<i64>,
}

/// One user's submission record for a quest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub quest_id: QuestId,
    pub user_id: String,
    /// Null until the server has scored the photo
    #[serde(default)]
    pub score: Option<i64>,
    /// Seconds taken, null until submitted
    #[serde(default)]
    pub time: Option<i64>,
}

/// Full quest record from `/api/quest-details/{questId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestDetails {
    pub quest_id: QuestId,
    pub prompt: String,
    pub host_id: String,
    #[serde(default)]
    pub date: Option<i64>,
    /// Winner as reported by the server.
    ///
    /// `None` when the field is absent, `Some(None)` when the server sent
    /// `null` because nobody has been scored yet.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub winner: Option<Option<String>>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

impl QuestDetails {
    /// Summary view of this quest.
    pub fn quest(&self) -> Quest {
        Quest {
            quest_id: self.quest_id,
            prompt: self.prompt.clone(),
            host_id: self.host_id.clone(),
            date: self.date,
        }
    }

    /// Look up a participant by user id.
    pub fn participant(&self, user_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    /// The winning participant.
    ///
    /// The server's `winner` field is authoritative when present: a `null`
    /// means no winner yet, and a named participant wins. The winner is
    /// computed locally only when the field is absent or names someone who
    /// did not take part.
    pub fn winning_participant(&self) -> Option<&Participant> {
        let Some(reported) = &self.winner else {
            return winner::determine_winner(&self.participants);
        };
        let Some(id) = reported else {
            return None;
        };
        if let Some(participant) = self.participant(id) {
            return Some(participant);
        }
        tracing::warn!(
            quest_id = self.quest_id,
            winner = %id,
            "Server winner is not a participant, computing locally"
        );
        winner::determine_winner(&self.participants)
    }
}

/// Keeps an explicit `null` distinct from a missing field.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Body for `/api/create-quest`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestRequest {
    pub prompt: String,
    pub host_id: String,
    pub user_ids: Vec<String>,
    /// Bare base64 photo, no data-URI prefix
    pub image: String,
    /// Seconds the host took
    pub time: u64,
}

/// Response from `/api/create-quest`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestResponse {
    #[serde(default)]
    pub message: String,
    pub quest_id: QuestId,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub timetaken: Option<i64>,
}

/// Body for `/api/complete-quest`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteQuestRequest {
    pub quest_id: QuestId,
    pub user_id: String,
    /// Bare base64 photo, no data-URI prefix
    pub image: String,
    pub time: u64,
}

/// Response from `/api/complete-quest`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteQuestResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub score: Option<i64>,
}

/// Wrapper for the list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestList {
    #[serde(default)]
    pub quests: Vec<Quest>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PromptResponse {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageResponse {
    #[serde(default)]
    pub image: Option<String>,
}
