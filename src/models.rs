use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::game::{GameInfo, GameState, GuessOutcome, Stats};
use crate::services::registry::SessionRegistry;
use crate::services::score_store::{ScoreRecord, ScoreStore};
use crate::services::word_loader::WordCatalog;

/// Application state shared across all handlers
pub struct AppState {
    pub catalog: WordCatalog,
    pub sessions: SessionRegistry,
    pub scores: Arc<dyn ScoreStore>,
}

impl AppState {
    pub fn new(catalog: WordCatalog, scores: Arc<dyn ScoreStore>) -> Self {
        Self {
            catalog,
            sessions: SessionRegistry::new(),
            scores,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StartRequest {
    pub category: Option<String>,
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    pub letter: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreSubmission {
    pub name: String,
    pub score: i64,
}

#[derive(Serialize)]
pub struct StartResponse {
    pub success: bool,
    pub session_id: Uuid,
    pub game: GameInfo,
    pub game_state: GameState,
    pub stats: Stats,
}

#[derive(Serialize)]
pub struct GuessResponse {
    pub success: bool,
    pub result: GuessOutcome,
    pub stats: Stats,
}

#[derive(Serialize)]
pub struct StateResponse {
    pub success: bool,
    pub game_state: GameState,
    pub stats: Stats,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<String>,
}

#[derive(Serialize)]
pub struct ScoresResponse {
    pub success: bool,
    pub scores: Vec<ScoreRecord>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub categories_loaded: bool,
    pub categories_count: usize,
    pub active_sessions: usize,
}

#[derive(Serialize)]
pub struct Ack {
    pub success: bool,
}
