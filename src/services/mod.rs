// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - API access and quest logic.

pub mod api;
pub mod image;
pub mod invites;
pub mod lifecycle;
pub mod polling;
pub mod winner;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{QuestApi, QuestApiClient};
pub use image::CapturedImage;
pub use invites::{InviteError, InviteList};
pub use lifecycle::{QuestAction, QuestFlow, QuestState, SubmissionOutcome};
pub use polling::{ElapsedTimer, PointsPoller};
pub use winner::determine_winner;
