// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory `QuestApi` for unit tests.

use crate::error::{ClientError, Result};
use crate::models::{
    AuthResponse, CompleteQuestRequest, CompleteQuestResponse, CreateQuestRequest,
    CreateQuestResponse, Quest, QuestDetails, QuestId,
};
use crate::services::QuestApi;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct FakeState {
    passwords: HashMap<String, String>,
    points: HashMap<String, i64>,
    prompt: Option<String>,
    pending: Vec<Quest>,
    completed: Vec<Quest>,
    details: HashMap<QuestId, QuestDetails>,
    images: HashMap<(QuestId, String), String>,
    fail_lookups: bool,
    fail_submissions: u32,
    created: Vec<CreateQuestRequest>,
    completions: Vec<CompleteQuestRequest>,
    calls: HashMap<&'static str, usize>,
}

/// Scriptable fake backend.
#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_user(self, user_id: &str, password: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .passwords
            .insert(user_id.to_string(), password.to_string());
        self
    }

    pub fn with_points(self, user_id: &str, points: i64) -> Self {
        self.set_points(user_id, points);
        self
    }

    pub fn with_prompt(self, prompt: &str) -> Self {
        self.state.lock().unwrap().prompt = Some(prompt.to_string());
        self
    }

    pub fn with_pending(self, quest: Quest) -> Self {
        self.state.lock().unwrap().pending.push(quest);
        self
    }

    pub fn with_completed(self, details: QuestDetails) -> Self {
        let mut state = self.state.lock().unwrap();
        state.completed.push(details.quest());
        state.details.insert(details.quest_id, details);
        drop(state);
        self
    }

    pub fn with_image(self, quest_id: QuestId, user_id: &str, base64: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .images
            .insert((quest_id, user_id.to_string()), base64.to_string());
        self
    }

    /// Make `user_exists` fail with a server error.
    pub fn failing_lookups(self) -> Self {
        self.state.lock().unwrap().fail_lookups = true;
        self
    }

    /// Fail the next `n` create/complete submissions.
    pub fn failing_submissions(self, n: u32) -> Self {
        self.state.lock().unwrap().fail_submissions = n;
        self
    }

    pub fn set_points(&self, user_id: &str, points: i64) {
        self.state
            .lock()
            .unwrap()
            .points
            .insert(user_id.to_string(), points);
    }

    pub fn calls(&self, name: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn created(&self) -> Vec<CreateQuestRequest> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn completions(&self) -> Vec<CompleteQuestRequest> {
        self.state.lock().unwrap().completions.clone()
    }

    fn record(&self, name: &'static str) -> std::sync::MutexGuard<'_, FakeState> {
        let mut state = self.state.lock().unwrap();
        *state.calls.entry(name).or_default() += 1;
        state
    }
}

fn server_error() -> ClientError {
    ClientError::Status {
        status: 500,
        message: "boom".to_string(),
    }
}

#[async_trait]
impl QuestApi for FakeApi {
    async fn register(&self, user_id: &str, password: &str) -> Result<AuthResponse> {
        let mut state = self.record("register");
        if state.passwords.contains_key(user_id) {
            return Err(ClientError::Status {
                status: 400,
                message: "User already exists".to_string(),
            });
        }
        state
            .passwords
            .insert(user_id.to_string(), password.to_string());
        Ok(AuthResponse {
            message: "User registered successfully".to_string(),
            user_id: Some(user_id.to_string()),
        })
    }

    async fn login(&self, user_id: &str, password: &str) -> Result<AuthResponse> {
        let state = self.record("login");
        match state.passwords.get(user_id) {
            Some(p) if p == password => Ok(AuthResponse {
                message: "Login successful".to_string(),
                user_id: None,
            }),
            _ => Err(ClientError::Status {
                status: 401,
                message: "Invalid userID or password".to_string(),
            }),
        }
    }

    async fn pending_quests(&self, _user_id: &str) -> Result<Vec<Quest>> {
        Ok(self.record("pending_quests").pending.clone())
    }

    async fn completed_quests(&self, _user_id: &str) -> Result<Vec<Quest>> {
        Ok(self.record("completed_quests").completed.clone())
    }

    async fn create_quest(&self, request: &CreateQuestRequest) -> Result<CreateQuestResponse> {
        let mut state = self.record("create_quest");
        if state.fail_submissions > 0 {
            state.fail_submissions -= 1;
            return Err(server_error());
        }
        state.created.push(request.clone());
        Ok(CreateQuestResponse {
            message: "Quest created successfully".to_string(),
            quest_id: 100 + state.created.len() as QuestId,
            score: Some(42),
            timetaken: Some(request.time as i64),
        })
    }

    async fn get_prompt(&self) -> Result<String> {
        self.record("get_prompt")
            .prompt
            .clone()
            .ok_or_else(server_error)
    }

    async fn complete_quest(
        &self,
        request: &CompleteQuestRequest,
    ) -> Result<CompleteQuestResponse> {
        let mut state = self.record("complete_quest");
        if state.fail_submissions > 0 {
            state.fail_submissions -= 1;
            return Err(server_error());
        }
        state.completions.push(request.clone());
        Ok(CompleteQuestResponse {
            message: "Quest completed successfully".to_string(),
            score: Some(64),
        })
    }

    async fn quest_details(&self, quest_id: QuestId) -> Result<QuestDetails> {
        self.record("quest_details")
            .details
            .get(&quest_id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("Quest not found".to_string()))
    }

    async fn user_exists(&self, user_id: &str) -> Result<bool> {
        let state = self.record("user_exists");
        if state.fail_lookups {
            return Err(server_error());
        }
        Ok(state.passwords.contains_key(user_id))
    }

    async fn get_points(&self, user_id: &str) -> Result<i64> {
        self.record("get_points")
            .points
            .get(user_id)
            .copied()
            .ok_or_else(|| ClientError::NotFound("User not found or has no points".to_string()))
    }

    async fn get_image(&self, quest_id: QuestId, user_id: &str) -> Result<Option<String>> {
        Ok(self
            .record("get_image")
            .images
            .get(&(quest_id, user_id.to_string()))
            .cloned())
    }
}
