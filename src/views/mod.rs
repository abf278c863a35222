// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screen view-models.
//!
//! Each screen loads what it shows through `QuestApi`, turns failures into a
//! displayable state, and renders itself as text via `Display`.

pub mod completed;
pub mod create;
pub mod home;
pub mod pending;
pub mod quest;

pub use completed::{CompletedListView, CompletedQuestView, ParticipantRow, PhotoView, QuestReview};
pub use create::CreateQuestView;
pub use home::HomeView;
pub use pending::{PendingListView, PendingQuestView};
pub use quest::QuestScreen;

/// Shown when a quest cannot be loaded or is not in the user's list.
pub const QUEST_NOT_FOUND: &str = "Quest Not Found";

/// Confirmation text before a timed quest starts.
pub const START_QUEST_WARNING: &str = "Are you sure you want to start this quest? \
    Once started, leaving the page will forfeit the quest!";
