// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the Shutter Quest API.

pub mod quest;
pub mod user;

pub use quest::{
    CompleteQuestRequest, CompleteQuestResponse, CreateQuestRequest, CreateQuestResponse,
    Participant, Quest, QuestDetails, QuestId,
};
pub use user::{AuthResponse, Credentials, POINTS_UNKNOWN};
