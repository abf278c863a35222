// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process fake of the Shutter Quest backend.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use shutter_quest::services::QuestApiClient;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct QuestRecord {
    pub prompt: String,
    pub host_id: String,
    pub date: i64,
}

#[derive(Debug, Clone)]
pub struct ParticipantRecord {
    pub quest_id: i64,
    pub user_id: String,
    pub score: Option<i64>,
    pub time: Option<i64>,
}

/// Backend state. Tests seed it before spawning and inspect it afterwards.
#[derive(Debug)]
pub struct Backend {
    pub passwords: HashMap<String, String>,
    pub points: HashMap<String, i64>,
    pub quests: BTreeMap<i64, QuestRecord>,
    pub participants: Vec<ParticipantRecord>,
    pub images: HashMap<(i64, String), String>,
    pub prompt: String,
    /// Score given to the next submitted photo
    pub next_score: i64,
    /// Respond 500 to every get-points call
    pub fail_points: bool,
    /// Requests missing the tunnel header
    pub missing_tunnel_header: usize,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            passwords: HashMap::new(),
            points: HashMap::new(),
            quests: BTreeMap::new(),
            participants: Vec::new(),
            images: HashMap::new(),
            prompt: "something green".to_string(),
            next_score: 50,
            fail_points: false,
            missing_tunnel_header: 0,
        }
    }
}

impl Backend {
    pub fn with_user(mut self, user_id: &str, password: &str) -> Self {
        self.passwords
            .insert(user_id.to_string(), password.to_string());
        self.points.insert(user_id.to_string(), 0);
        self
    }

    /// Seed a quest directly, participants as `(user, score, time)`.
    pub fn with_quest(
        mut self,
        quest_id: i64,
        prompt: &str,
        host_id: &str,
        participants: &[(&str, Option<i64>, Option<i64>)],
    ) -> Self {
        self.quests.insert(
            quest_id,
            QuestRecord {
                prompt: prompt.to_string(),
                host_id: host_id.to_string(),
                date: 1_736_035_200,
            },
        );
        for (user_id, score, time) in participants {
            self.participants.push(ParticipantRecord {
                quest_id,
                user_id: user_id.to_string(),
                score: *score,
                time: *time,
            });
        }
        self
    }

    fn quest_summary(&self, quest_id: i64) -> Option<Value> {
        self.quests.get(&quest_id).map(|q| {
            json!({"questId": quest_id, "prompt": q.prompt, "hostId": q.host_id, "date": q.date})
        })
    }

    fn quests_for(&self, user_id: &str, completed: bool) -> Vec<Value> {
        self.participants
            .iter()
            .filter(|p| p.user_id == user_id && p.score.is_some() == completed)
            .filter_map(|p| self.quest_summary(p.quest_id))
            .collect()
    }

    fn winner(&self, quest_id: i64) -> Option<String> {
        let mut best: Option<&ParticipantRecord> = None;
        for p in self.participants.iter().filter(|p| p.quest_id == quest_id) {
            let Some(score) = p.score else { continue };
            best = match best {
                None => Some(p),
                Some(b) if score > b.score.unwrap_or(i64::MIN) => Some(p),
                Some(b)
                    if Some(score) == b.score
                        && p.time.unwrap_or(i64::MAX) < b.time.unwrap_or(i64::MAX) =>
                {
                    Some(p)
                }
                other => other,
            };
        }
        best.map(|p| p.user_id.clone())
    }

    fn award_if_finished(&mut self, quest_id: i64) {
        let all_scored = self
            .participants
            .iter()
            .filter(|p| p.quest_id == quest_id)
            .all(|p| p.score.is_some());
        if all_scored {
            if let Some(winner) = self.winner(quest_id) {
                *self.points.entry(winner).or_default() += 1;
            }
        }
    }
}

pub type SharedBackend = Arc<Mutex<Backend>>;

/// Start the fake backend on an ephemeral port. Returns its base URL.
pub async fn spawn_backend(backend: Backend) -> (String, SharedBackend) {
    let state = Arc::new(Mutex::new(backend));
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake backend");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

/// Start the fake backend and build a client for it.
#[allow(dead_code)]
pub async fn client_for(backend: Backend) -> (QuestApiClient, SharedBackend) {
    let (url, state) = spawn_backend(backend).await;
    (QuestApiClient::new(&url).unwrap(), state)
}

fn router(state: SharedBackend) -> Router {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/get-user", get(get_user))
        .route("/api/pending-quests", get(pending_quests))
        .route("/api/completed-quests", get(completed_quests))
        .route("/api/create-quest", post(create_quest))
        .route("/api/get-prompt", get(get_prompt))
        .route("/api/complete-quest", post(complete_quest))
        .route("/api/quest-details/{quest_id}", get(quest_details))
        .route("/api/get-points", get(get_points))
        .route("/api/get-image", get(get_image))
        .with_state(state)
}

fn message(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "message": text }))).into_response()
}

fn check_header(state: &SharedBackend, headers: &HeaderMap) {
    if headers.get("ngrok-skip-browser-warning").is_none() {
        state.lock().unwrap().missing_tunnel_header += 1;
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserQuery {
    user_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageQuery {
    quest_id: i64,
    user_id: String,
}

async fn register(
    State(state): State<SharedBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    check_header(&state, &headers);
    let (Some(user_id), Some(password)) = (body["userId"].as_str(), body["password"].as_str())
    else {
        return message(StatusCode::BAD_REQUEST, "userID and password are required");
    };
    let mut backend = state.lock().unwrap();
    if backend.passwords.contains_key(user_id) {
        return message(StatusCode::BAD_REQUEST, "User already exists");
    }
    backend
        .passwords
        .insert(user_id.to_string(), password.to_string());
    backend.points.insert(user_id.to_string(), 0);
    (
        StatusCode::CREATED,
        Json(json!({"message": "User registered successfully", "userId": user_id})),
    )
        .into_response()
}

async fn login(State(state): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    let (Some(user_id), Some(password)) = (body["userId"].as_str(), body["password"].as_str())
    else {
        return message(StatusCode::BAD_REQUEST, "userID and password are required");
    };
    let backend = state.lock().unwrap();
    match backend.passwords.get(user_id) {
        Some(p) if p == password => message(StatusCode::OK, "Login successful"),
        _ => message(StatusCode::UNAUTHORIZED, "Invalid userID or password"),
    }
}

async fn get_user(State(state): State<SharedBackend>, Query(q): Query<UserQuery>) -> Response {
    let backend = state.lock().unwrap();
    match q.user_id {
        Some(id) if backend.passwords.contains_key(&id) => message(StatusCode::OK, "User exists"),
        _ => message(StatusCode::NOT_FOUND, "User does not exist"),
    }
}

async fn pending_quests(
    State(state): State<SharedBackend>,
    Query(q): Query<UserQuery>,
) -> Response {
    let Some(user_id) = q.user_id else {
        return message(StatusCode::BAD_REQUEST, "userId is required");
    };
    let backend = state.lock().unwrap();
    Json(json!({ "quests": backend.quests_for(&user_id, false) })).into_response()
}

async fn completed_quests(
    State(state): State<SharedBackend>,
    Query(q): Query<UserQuery>,
) -> Response {
    let Some(user_id) = q.user_id else {
        return message(StatusCode::BAD_REQUEST, "userId is required");
    };
    let backend = state.lock().unwrap();
    Json(json!({ "quests": backend.quests_for(&user_id, true) })).into_response()
}

async fn create_quest(
    State(state): State<SharedBackend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    check_header(&state, &headers);
    let image = body["image"].as_str().unwrap_or_default();
    let (Some(prompt), Some(host_id)) = (body["prompt"].as_str(), body["hostId"].as_str()) else {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create quest");
    };
    if image.is_empty() {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create quest");
    }
    let time = body["time"].as_i64();
    let invitees: Vec<String> = body["userIds"]
        .as_array()
        .map(|ids| ids.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_default();

    let mut backend = state.lock().unwrap();
    let quest_id = backend.quests.keys().next_back().copied().unwrap_or(0) + 1;
    backend.quests.insert(
        quest_id,
        QuestRecord {
            prompt: prompt.to_string(),
            host_id: host_id.to_string(),
            date: 1_736_035_200,
        },
    );
    for user_id in invitees {
        backend.participants.push(ParticipantRecord {
            quest_id,
            user_id,
            score: None,
            time: None,
        });
    }
    let score = backend.next_score;
    backend.participants.push(ParticipantRecord {
        quest_id,
        user_id: host_id.to_string(),
        score: Some(score),
        time,
    });
    backend
        .images
        .insert((quest_id, host_id.to_string()), image.to_string());

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Quest created successfully",
            "questId": quest_id,
            "score": score,
            "timetaken": time
        })),
    )
        .into_response()
}

async fn get_prompt(State(state): State<SharedBackend>) -> Response {
    let backend = state.lock().unwrap();
    Json(json!({ "prompt": backend.prompt })).into_response()
}

async fn complete_quest(State(state): State<SharedBackend>, Json(body): Json<Value>) -> Response {
    let mut backend = state.lock().unwrap();
    let quest_id = body["questId"].as_i64().unwrap_or_default();
    if !backend.quests.contains_key(&quest_id) {
        return message(StatusCode::NOT_FOUND, "Quest not found");
    }
    let user_id = body["userId"].as_str().unwrap_or_default().to_string();
    let image = body["image"].as_str().unwrap_or_default().to_string();
    let score = backend.next_score;
    let time = body["time"].as_i64();

    if let Some(p) = backend
        .participants
        .iter_mut()
        .find(|p| p.quest_id == quest_id && p.user_id == user_id)
    {
        p.score = Some(score);
        p.time = time;
    }
    backend.images.insert((quest_id, user_id), image);
    backend.award_if_finished(quest_id);

    Json(json!({"message": "Quest completed successfully", "score": score})).into_response()
}

async fn quest_details(State(state): State<SharedBackend>, Path(quest_id): Path<i64>) -> Response {
    let backend = state.lock().unwrap();
    let Some(quest) = backend.quests.get(&quest_id) else {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "Quest not found"}))).into_response();
    };
    let participants: Vec<Value> = backend
        .participants
        .iter()
        .filter(|p| p.quest_id == quest_id)
        .map(|p| {
            json!({"questId": p.quest_id, "userId": p.user_id, "score": p.score, "time": p.time})
        })
        .collect();

    Json(json!({
        "questId": quest_id,
        "prompt": quest.prompt,
        "hostId": quest.host_id,
        "date": quest.date,
        "winner": backend.winner(quest_id),
        "participants": participants
    }))
    .into_response()
}

async fn get_points(State(state): State<SharedBackend>, Query(q): Query<UserQuery>) -> Response {
    let backend = state.lock().unwrap();
    if backend.fail_points {
        return message(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    match q.user_id.and_then(|id| backend.points.get(&id).copied()) {
        Some(points) => Json(json!({ "points": points })).into_response(),
        None => message(StatusCode::NOT_FOUND, "User not found or has no points"),
    }
}

async fn get_image(State(state): State<SharedBackend>, Query(q): Query<ImageQuery>) -> Response {
    let backend = state.lock().unwrap();
    match backend.images.get(&(q.quest_id, q.user_id)) {
        Some(image) => Json(json!({ "image": image })).into_response(),
        None => message(StatusCode::NOT_FOUND, "Image not found"),
    }
}
