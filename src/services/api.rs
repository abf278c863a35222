// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shutter Quest API client.
//!
//! Handles:
//! - Account registration and login
//! - Pending/completed quest listings and quest details
//! - Quest creation and completion with photo proof
//! - User existence checks, point totals and participant photos

use crate::error::{ClientError, Result};
use crate::models::quest::{ImageResponse, PromptResponse, QuestList};
use crate::models::user::PointsResponse;
use crate::models::{
    AuthResponse, CompleteQuestRequest, CompleteQuestResponse, CreateQuestRequest,
    CreateQuestResponse, Credentials, Quest, QuestDetails, QuestId,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Operations the screens need from the backend.
///
/// `QuestApiClient` talks HTTP; tests substitute in-memory fakes.
#[async_trait]
pub trait QuestApi: Send + Sync {
    async fn register(&self, user_id: &str, password: &str) -> Result<AuthResponse>;

    async fn login(&self, user_id: &str, password: &str) -> Result<AuthResponse>;

    async fn pending_quests(&self, user_id: &str) -> Result<Vec<Quest>>;

    async fn completed_quests(&self, user_id: &str) -> Result<Vec<Quest>>;

    async fn create_quest(&self, request: &CreateQuestRequest) -> Result<CreateQuestResponse>;

    async fn get_prompt(&self) -> Result<String>;

    async fn complete_quest(&self, request: &CompleteQuestRequest)
        -> Result<CompleteQuestResponse>;

    async fn quest_details(&self, quest_id: QuestId) -> Result<QuestDetails>;

    /// `Ok(false)` when the server answers 404.
    async fn user_exists(&self, user_id: &str) -> Result<bool>;

    async fn get_points(&self, user_id: &str) -> Result<i64>;

    /// Bare base64 photo, `Ok(None)` when the server has none (404).
    async fn get_image(&self, quest_id: QuestId, user_id: &str) -> Result<Option<String>>;
}

/// HTTP client for the Shutter Quest API.
#[derive(Clone)]
pub struct QuestApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl QuestApiClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        // Tunnelled dev servers interpose a warning page without this header
        let mut headers = HeaderMap::new();
        headers.insert(
            "ngrok-skip-browser-warning",
            HeaderValue::from_static("true"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from loaded configuration.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Self::new(&config.api_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        check_response_json(response).await
    }

    /// Generic POST request with JSON body and response.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        check_response_json(response).await
    }
}

#[async_trait]
impl QuestApi for QuestApiClient {
    async fn register(&self, user_id: &str, password: &str) -> Result<AuthResponse> {
        let response = self
            .post_json("/api/register", &Credentials { user_id, password })
            .await?;
        tracing::info!(user_id = %user_id, "Registered account");
        Ok(response)
    }

    async fn login(&self, user_id: &str, password: &str) -> Result<AuthResponse> {
        self.post_json("/api/login", &Credentials { user_id, password })
            .await
    }

    async fn pending_quests(&self, user_id: &str) -> Result<Vec<Quest>> {
        let list: QuestList = self
            .get_json("/api/pending-quests", &[("userId", user_id)])
            .await?;
        tracing::debug!(user_id = %user_id, count = list.quests.len(), "Fetched pending quests");
        Ok(list.quests)
    }

    async fn completed_quests(&self, user_id: &str) -> Result<Vec<Quest>> {
        let list: QuestList = self
            .get_json("/api/completed-quests", &[("userId", user_id)])
            .await?;
        tracing::debug!(user_id = %user_id, count = list.quests.len(), "Fetched completed quests");
        Ok(list.quests)
    }

    async fn create_quest(&self, request: &CreateQuestRequest) -> Result<CreateQuestResponse> {
        let response: CreateQuestResponse = self.post_json("/api/create-quest", request).await?;
        tracing::info!(
            quest_id = response.quest_id,
            host_id = %request.host_id,
            invited = request.user_ids.len(),
            "Quest created"
        );
        Ok(response)
    }

    async fn get_prompt(&self) -> Result<String> {
        let response: PromptResponse = self.get_json("/api/get-prompt", &[]).await?;
        Ok(response.prompt)
    }

    async fn complete_quest(
        &self,
        request: &CompleteQuestRequest,
    ) -> Result<CompleteQuestResponse> {
        let response: CompleteQuestResponse =
            self.post_json("/api/complete-quest", request).await?;
        tracing::info!(
            quest_id = request.quest_id,
            user_id = %request.user_id,
            score = ?response.score,
            "Quest completed"
        );
        Ok(response)
    }

    async fn quest_details(&self, quest_id: QuestId) -> Result<QuestDetails> {
        self.get_json(&format!("/api/quest-details/{}", quest_id), &[])
            .await
    }

    async fn user_exists(&self, user_id: &str) -> Result<bool> {
        let response = self
            .http
            .get(self.url("/api/get-user"))
            .query(&[("userId", user_id)])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            _ => Err(error_from_response(response).await),
        }
    }

    async fn get_points(&self, user_id: &str) -> Result<i64> {
        let response: PointsResponse = self
            .get_json("/api/get-points", &[("userId", user_id)])
            .await?;
        Ok(response.points)
    }

    async fn get_image(&self, quest_id: QuestId, user_id: &str) -> Result<Option<String>> {
        let quest_id = quest_id.to_string();
        let result: Result<ImageResponse> = self
            .get_json(
                "/api/get-image",
                &[("questId", quest_id.as_str()), ("userId", user_id)],
            )
            .await;

        match result {
            Ok(response) => Ok(response
                .image
                .map(|image| crate::services::image::strip_data_uri(&image).to_string())
                .filter(|image| !image.is_empty())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Error body shape shared by the API's failure responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Check response status and parse JSON body.
async fn check_response_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(format!("JSON parse error: {}", e)))
}

/// Turn a non-success response into an error, keeping the server's message.
async fn error_from_response(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or(body);

    if status == StatusCode::NOT_FOUND {
        return ClientError::NotFound(if message.is_empty() { url } else { message });
    }

    tracing::warn!(status = status.as_u16(), path = %url, message = %message, "API request failed");
    ClientError::Status {
        status: status.as_u16(),
        message,
    }
}
