use actix_web::{get, post, web, HttpResponse};
use log::info;

use crate::error::ApiError;
use crate::models::{Ack, AppState, ScoreSubmission, ScoresResponse};
use crate::services::score_store::{top_scores, ScoreRecord};

pub const SCOREBOARD_SIZE: usize = 10;

#[get("/api/scores")]
pub async fn get_scores(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let store = data.scores.clone();
    let records = web::block(move || store.records())
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ScoresResponse {
        success: true,
        scores: top_scores(records, SCOREBOARD_SIZE),
    }))
}

#[post("/api/scores")]
pub async fn save_score(
    data: web::Data<AppState>,
    body: web::Json<ScoreSubmission>,
) -> Result<HttpResponse, ApiError> {
    let record = ScoreRecord::new(&body.name, body.score)?;
    info!("Saving score {} for {}", record.score, record.name);

    let store = data.scores.clone();
    web::block(move || store.append(&record))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(Ack { success: true }))
}
