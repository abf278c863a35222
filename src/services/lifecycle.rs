// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quest submission flow, as seen from the client.
//!
//! ```text
//! Draft --capture--> Captured --submit--> Submitted --ok--> Completed
//!                      ^  |                   |
//!                      |  +--capture (retake) +--err--> Failed
//!                      +--------capture / submit (retry)----+
//! ```
//!
//! Submission is a single attempt. On failure the flow keeps the photo and
//! the error so the user can retry by hand.

use crate::error::{ClientError, Result};
use crate::models::{CompleteQuestRequest, CreateQuestRequest, Quest, QuestId};
use crate::services::image::CapturedImage;
use crate::services::QuestApi;

/// Prompt shown when the server could not supply one.
pub const PROMPT_FALLBACK: &str = "Failed to load prompt";

/// What the flow submits when done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestAction {
    /// Host creating a new quest for the invitees.
    Create {
        host_id: String,
        invitees: Vec<String>,
    },
    /// Invited user submitting proof for a pending quest.
    Complete { quest_id: QuestId, user_id: String },
}

/// Server's answer to a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// Quest created or completed
    pub quest_id: QuestId,
    /// Score the server gave the photo, when it reported one
    pub score: Option<i64>,
    pub message: String,
}

/// Lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestState {
    /// Prompt known, no photo yet.
    Draft,
    /// Photo attached locally.
    Captured(CapturedImage),
    /// Request in flight.
    Submitted,
    /// Server accepted the submission.
    Completed(SubmissionOutcome),
    /// Last submission failed; photo kept for a retry.
    Failed {
        image: CapturedImage,
        error: String,
    },
}

impl QuestState {
    pub fn name(&self) -> &'static str {
        match self {
            QuestState::Draft => "draft",
            QuestState::Captured(_) => "captured",
            QuestState::Submitted => "submitted",
            QuestState::Completed(_) => "completed",
            QuestState::Failed { .. } => "failed",
        }
    }
}

/// One create or complete flow.
#[derive(Debug, Clone)]
pub struct QuestFlow {
    action: QuestAction,
    prompt: String,
    state: QuestState,
}

impl QuestFlow {
    /// Start a creation flow, fetching a prompt from the server.
    ///
    /// A failed prompt fetch is logged and replaced by `PROMPT_FALLBACK`.
    pub async fn for_creation<A: QuestApi + ?Sized>(
        api: &A,
        host_id: &str,
        invitees: Vec<String>,
    ) -> Self {
        let prompt = match api.get_prompt().await {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch prompt");
                PROMPT_FALLBACK.to_string()
            }
        };
        Self::new(
            QuestAction::Create {
                host_id: host_id.to_string(),
                invitees,
            },
            prompt,
        )
    }

    /// Start a completion flow for a pending quest.
    pub fn for_completion(quest: &Quest, user_id: &str) -> Self {
        Self::new(
            QuestAction::Complete {
                quest_id: quest.quest_id,
                user_id: user_id.to_string(),
            },
            quest.prompt.clone(),
        )
    }

    fn new(action: QuestAction, prompt: String) -> Self {
        Self {
            action,
            prompt,
            state: QuestState::Draft,
        }
    }

    pub fn action(&self) -> &QuestAction {
        &self.action
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn state(&self) -> &QuestState {
        &self.state
    }

    /// Photo currently attached, if any.
    pub fn image(&self) -> Option<&CapturedImage> {
        match &self.state {
            QuestState::Captured(image) | QuestState::Failed { image, .. } => Some(image),
            _ => None,
        }
    }

    /// Error from the last failed submission.
    pub fn last_error(&self) -> Option<&str> {
        match &self.state {
            QuestState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.image().is_some()
    }

    /// Attach (or replace) the photo.
    pub fn capture(&mut self, image: CapturedImage) -> Result<()> {
        match self.state {
            QuestState::Draft | QuestState::Captured(_) | QuestState::Failed { .. } => {
                self.state = QuestState::Captured(image);
                Ok(())
            }
            QuestState::Submitted | QuestState::Completed(_) => Err(ClientError::InvalidInput(
                format!("cannot capture a photo once {}", self.state.name()),
            )),
        }
    }

    /// Send the photo to the server.
    ///
    /// Without a photo this fails before any request is made. `elapsed_secs`
    /// is sent along as the time taken.
    pub async fn submit<A: QuestApi + ?Sized>(
        &mut self,
        api: &A,
        elapsed_secs: u64,
    ) -> Result<SubmissionOutcome> {
        let image = match &self.state {
            QuestState::Captured(image) | QuestState::Failed { image, .. } => image.clone(),
            QuestState::Draft => return Err(ClientError::MissingImage),
            QuestState::Submitted | QuestState::Completed(_) => {
                return Err(ClientError::InvalidInput(format!(
                    "quest already {}",
                    self.state.name()
                )))
            }
        };

        self.state = QuestState::Submitted;
        let result = self.send(api, &image, elapsed_secs).await;

        match result {
            Ok(outcome) => {
                self.state = QuestState::Completed(outcome.clone());
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(action = ?self.action, error = %e, "Quest submission failed");
                self.state = QuestState::Failed {
                    image,
                    error: e.user_message(),
                };
                Err(e)
            }
        }
    }

    async fn send<A: QuestApi + ?Sized>(
        &self,
        api: &A,
        image: &CapturedImage,
        elapsed_secs: u64,
    ) -> Result<SubmissionOutcome> {
        match &self.action {
            QuestAction::Create { host_id, invitees } => {
                let request = CreateQuestRequest {
                    prompt: self.prompt.clone(),
                    host_id: host_id.clone(),
                    user_ids: invitees.clone(),
                    image: image.as_base64().to_string(),
                    time: elapsed_secs,
                };
                let response = api.create_quest(&request).await?;
                Ok(SubmissionOutcome {
                    quest_id: response.quest_id,
                    score: response.score,
                    message: response.message,
                })
            }
            QuestAction::Complete { quest_id, user_id } => {
                let request = CompleteQuestRequest {
                    quest_id: *quest_id,
                    user_id: user_id.clone(),
                    image: image.as_base64().to_string(),
                    time: elapsed_secs,
                };
                let response = api.complete_quest(&request).await?;
                Ok(SubmissionOutcome {
                    quest_id: *quest_id,
                    score: response.score,
                    message: response.message,
                })
            }
        }
    }
}
