// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Timed photo screen shared by quest creation and completion.

use crate::error::Result;
use crate::services::lifecycle::{QuestAction, QuestFlow, QuestState, SubmissionOutcome};
use crate::services::{CapturedImage, ElapsedTimer, QuestApi};
use std::fmt;

/// A quest flow plus the clock that started when the screen opened.
///
/// Dropping the screen stops the clock.
pub struct QuestScreen {
    flow: QuestFlow,
    timer: ElapsedTimer,
}

impl QuestScreen {
    /// Open the screen. Must be called inside a Tokio runtime.
    pub fn open(flow: QuestFlow) -> Self {
        Self {
            flow,
            timer: ElapsedTimer::start(),
        }
    }

    pub fn flow(&self) -> &QuestFlow {
        &self.flow
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.timer.elapsed_secs()
    }

    pub fn capture(&mut self, image: CapturedImage) -> Result<()> {
        self.flow.capture(image)
    }

    /// Submit with the time elapsed so far.
    pub async fn submit<A: QuestApi + ?Sized>(&mut self, api: &A) -> Result<SubmissionOutcome> {
        let elapsed = self.timer.elapsed_secs();
        self.flow.submit(api, elapsed).await
    }
}

impl fmt::Display for QuestScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self.flow.action() {
            QuestAction::Create { .. } => "Create Quest",
            QuestAction::Complete { .. } => "Complete Quest",
        };
        writeln!(f, "{}  [{}]", title, self.timer.display())?;
        writeln!(f, "Prompt: {}", self.flow.prompt())?;

        if let QuestAction::Create { invitees, .. } = self.flow.action() {
            if !invitees.is_empty() {
                writeln!(f, "Invited Users: {}", invitees.join(", "))?;
            }
        }

        match self.flow.state() {
            QuestState::Draft => writeln!(f, "No photo taken yet"),
            QuestState::Captured(image) => writeln!(f, "Photo ready ({})", image.mime()),
            QuestState::Submitted => writeln!(f, "Submitting..."),
            QuestState::Completed(outcome) => match outcome.score {
                Some(score) => writeln!(f, "Submitted! Score: {}", score),
                None => writeln!(f, "Submitted!"),
            },
            QuestState::Failed { error, .. } => writeln!(f, "Submission failed: {}", error),
        }
    }
}
