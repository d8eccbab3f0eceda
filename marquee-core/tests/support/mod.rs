//! In-memory stand-in for the TMDB API, driven through the `Transport` seam.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use marquee_core::routes::Method;
use marquee_core::{
    HttpRequest, HttpResponse, RequestDefaults, TmdbClient, TmdbRepository,
    Transport, TransportError,
};
use marquee_core::{ConfigStore, SessionStore};
use serde_json::{Value, json};
use tokio::sync::Mutex;

/// Replays canned responses in order; an exhausted script is a connect error.
#[derive(Debug, Clone, Default)]
pub struct StubTransport {
    script: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push_json(&self, status: u16, body: Value) {
        self.script
            .lock()
            .await
            .push_back(Ok(HttpResponse::new(status, body.to_string())));
    }

    pub async fn push_raw(&self, status: u16, body: &str) {
        self.script
            .lock()
            .await
            .push_back(Ok(HttpResponse::new(status, body.to_owned())));
    }

    pub async fn push_error(&self, error: TransportError) {
        self.script.lock().await.push_back(Err(error));
    }

    pub async fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().await.clone()
    }

    pub fn repository(&self) -> TmdbRepository {
        TmdbRepository::with_transport(Arc::new(self.clone()))
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        self.sent.lock().await.push(request);
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connect("script exhausted".into())))
    }
}

pub const ACCOUNT_ID: u64 = 4242;
pub const DISCOVER_PAGES: u32 = 3;

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    tokens: HashMap<String, bool>,
    sessions: HashSet<String>,
    favorites: HashSet<(String, u64)>,
    watchlist: HashSet<(String, u64)>,
    requests: Vec<HttpRequest>,
}

/// Stateful fake: request tokens, sessions, favorites and a small catalog.
#[derive(Debug, Clone, Default)]
pub struct FakeTmdb {
    state: Arc<Mutex<State>>,
}

impl FakeTmdb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository(&self) -> TmdbRepository {
        TmdbRepository::new(
            TmdbClient::with_defaults(
                Arc::new(self.clone()),
                RequestDefaults {
                    language: "en-US".into(),
                },
            ),
            ConfigStore::in_memory(),
            SessionStore::new(),
        )
    }

    /// Simulate the user approving `token` on the TMDB website.
    pub async fn approve(&self, token: &str) {
        if let Some(approved) = self.state.lock().await.tokens.get_mut(token) {
            *approved = true;
        }
    }

    pub async fn request_count(&self) -> usize {
        self.state.lock().await.requests.len()
    }

    pub async fn requests_to(&self, path: &str) -> usize {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .filter(|req| req.path == path)
            .count()
    }

    pub async fn favorites(&self) -> usize {
        self.state.lock().await.favorites.len()
    }

    pub async fn has_session(&self, session_id: &str) -> bool {
        self.state.lock().await.sessions.contains(session_id)
    }
}

#[async_trait]
impl Transport for FakeTmdb {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let mut state = self.state.lock().await;
        state.requests.push(request.clone());
        Ok(route(&mut state, &request))
    }
}

fn route(state: &mut State, request: &HttpRequest) -> HttpResponse {
    let segments: Vec<&str> = request.path.split('/').collect();
    match (request.method, segments.as_slice()) {
        (Method::Get, ["authentication", "token", "new"]) => {
            state.next_id += 1;
            let token = format!("token-{}", state.next_id);
            state.tokens.insert(token.clone(), false);
            ok(json!({
                "success": true,
                "expires_at": "2026-10-17 12:00:00 UTC",
                "request_token": token,
            }))
        }
        (Method::Post, ["authentication", "session", "new"]) => {
            let token = body_str(request, "request_token");
            if state.tokens.remove(&token) != Some(true) {
                return failure(401, 17, "Session denied.");
            }
            state.next_id += 1;
            let session_id = format!("session-{}", state.next_id);
            state.sessions.insert(session_id.clone());
            ok(json!({"success": true, "session_id": session_id}))
        }
        (Method::Delete, ["authentication", "session"]) => {
            let session_id = body_str(request, "session_id");
            if state.sessions.remove(&session_id) {
                ok(json!({"success": true}))
            } else {
                failure(404, 6, "Invalid id: The pre-requisite id is invalid or not found.")
            }
        }
        (Method::Get, ["account"]) => {
            if !has_session(state, request) {
                return failure(401, 3, "Authentication failed: You do not have permissions to access the service.");
            }
            ok(json!({
                "id": ACCOUNT_ID,
                "username": "cinephile",
                "name": "Cine Phile",
                "include_adult": false,
                "avatar": {"gravatar": {"hash": "abc"}, "tmdb": {"avatar_path": null}},
            }))
        }
        (Method::Get, [media, id, "account_states"]) => {
            if !has_session(state, request) {
                return failure(401, 3, "Authentication failed.");
            }
            let Ok(id) = id.parse::<u64>() else {
                return failure(404, 34, "The resource you requested could not be found.");
            };
            let key = (media.to_string(), id);
            ok(json!({
                "id": id,
                "favorite": state.favorites.contains(&key),
                "watchlist": state.watchlist.contains(&key),
                "rated": false,
            }))
        }
        (Method::Post, ["account", _, list @ ("favorite" | "watchlist")]) => {
            if !has_session(state, request) {
                return failure(401, 3, "Authentication failed.");
            }
            let body = request.body.clone().unwrap_or(Value::Null);
            let media = body["media_type"].as_str().unwrap_or_default().to_string();
            let media_id = body["media_id"].as_u64().unwrap_or_default();
            let flag = body[*list].as_bool().unwrap_or_default();

            let set = if *list == "favorite" {
                &mut state.favorites
            } else {
                &mut state.watchlist
            };
            let key = (media, media_id);
            let (code, message) = match (flag, set.contains(&key)) {
                (true, false) => (1, "Success."),
                (true, true) => (12, "The item/record was updated successfully."),
                (false, _) => (13, "The item/record was deleted successfully."),
            };
            if flag {
                set.insert(key);
            } else {
                set.remove(&key);
            }
            ok(json!({"status_code": code, "status_message": message}))
        }
        (Method::Get, ["movie" | "tv", "0"]) => {
            failure(404, 34, "The resource you requested could not be found.")
        }
        (Method::Get, [media @ ("movie" | "tv"), id]) => {
            let Ok(id) = id.parse::<u64>() else {
                return failure(404, 34, "The resource you requested could not be found.");
            };
            let title_key = if *media == "movie" { "title" } else { "name" };
            let mut body = json!({
                "id": id,
                "credits": {"cast": [], "crew": []},
                "videos": {"results": []},
            });
            body[title_key] = json!(format!("Title {id}"));
            ok(body)
        }
        (Method::Get, ["discover", media @ ("movie" | "tv")]) => {
            let page = request
                .query_value("page")
                .and_then(|p| p.parse::<u32>().ok())
                .unwrap_or(1);
            let results: Vec<Value> = (0..2)
                .map(|n| json!({"id": u64::from(page) * 100 + n, "title": format!("{media} {page}.{n}")}))
                .collect();
            ok(json!({
                "page": page,
                "total_pages": DISCOVER_PAGES,
                "total_results": DISCOVER_PAGES * 2,
                "results": results,
            }))
        }
        _ => failure(404, 34, "The resource you requested could not be found."),
    }
}

fn has_session(state: &State, request: &HttpRequest) -> bool {
    request
        .query_value("session_id")
        .is_some_and(|id| state.sessions.contains(id))
}

fn body_str(request: &HttpRequest, field: &str) -> String {
    request
        .body
        .as_ref()
        .and_then(|body| body[field].as_str())
        .unwrap_or_default()
        .to_string()
}

fn ok(body: Value) -> HttpResponse {
    HttpResponse::json(200, &body)
}

fn failure(status: u16, code: u32, message: &str) -> HttpResponse {
    HttpResponse::json(
        status,
        &json!({"success": false, "status_code": code, "status_message": message}),
    )
}
