use actix_web::http::header;
use actix_web::{delete, get, post, web, HttpRequest, HttpResponse};
use log::{debug, info};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{
    Ack, AppState, GuessRequest, GuessResponse, StartRequest, StartResponse, StateResponse,
};
use crate::services::game::{GameSession, GameStatus, GuessOutcome};
use crate::services::registry::{SessionId, SharedSession};

fn find_session(data: &AppState, id: &SessionId) -> Result<SharedSession, ApiError> {
    data.sessions.get(id).ok_or_else(|| {
        debug!("Unknown session requested: {}", id);
        ApiError::SessionNotFound
    })
}

fn log_finished(id: &SessionId, outcome: &GuessOutcome) {
    match outcome.game_state.status {
        GameStatus::Won => info!(
            "Session {} won (score {}, streak {})",
            id, outcome.game_state.score, outcome.game_state.streak
        ),
        GameStatus::Lost => info!("Session {} lost", id),
        GameStatus::Active => {}
    }
}

/// Start a round. A known `session_id` chains the round onto that session,
/// keeping its score and streak; otherwise a new session is created.
/// A request without a body starts a random round; a malformed body is rejected.
#[post("/api/game/start")]
pub async fn start_game(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: Result<web::Json<StartRequest>, actix_web::Error>,
) -> Result<HttpResponse, actix_web::Error> {
    let request = match body {
        Ok(json) => json.into_inner(),
        Err(_) if !req.headers().contains_key(header::CONTENT_TYPE) => StartRequest::default(),
        Err(e) => return Err(e),
    };
    let category = request
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    if let Some(id) = request.session_id {
        if let Some(session) = data.sessions.get(&id) {
            let mut game = session.lock();
            let info = game.new_game(&data.catalog, category).map_err(ApiError::from)?;
            info!("Session {} started a new round in {}", id, info.category);
            return Ok(HttpResponse::Ok().json(StartResponse {
                success: true,
                session_id: id,
                game: info,
                game_state: game.state(),
                stats: game.stats(&data.catalog),
            }));
        }
        debug!("Session {} not found on start, creating a new one", id);
    }

    let game = GameSession::start(&data.catalog, category).map_err(ApiError::from)?;
    let id = Uuid::new_v4();
    let response = StartResponse {
        success: true,
        session_id: id,
        game: game.info(),
        game_state: game.state(),
        stats: game.stats(&data.catalog),
    };
    data.sessions.create(id, game);
    info!("Session {} started in {}", id, response.game.category);

    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/game/{id}/guess")]
pub async fn guess_letter(
    data: web::Data<AppState>,
    path: web::Path<SessionId>,
    body: web::Json<GuessRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let session = find_session(&data, &id)?;
    let mut game = session.lock();

    let result = game.guess(&body.letter).map_err(|e| {
        debug!("Rejected guess {:?} for session {}: {}", body.letter, id, e);
        e
    })?;
    log_finished(&id, &result);

    Ok(HttpResponse::Ok().json(GuessResponse {
        success: true,
        result,
        stats: game.stats(&data.catalog),
    }))
}

#[post("/api/game/{id}/hint")]
pub async fn get_hint(
    data: web::Data<AppState>,
    path: web::Path<SessionId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let session = find_session(&data, &id)?;
    let mut game = session.lock();

    let result = game.hint()?;
    info!("Session {} used a hint: {}", id, result.letter);
    log_finished(&id, &result);

    Ok(HttpResponse::Ok().json(GuessResponse {
        success: true,
        result,
        stats: game.stats(&data.catalog),
    }))
}

#[get("/api/game/{id}/state")]
pub async fn get_state(
    data: web::Data<AppState>,
    path: web::Path<SessionId>,
) -> Result<HttpResponse, ApiError> {
    let session = find_session(&data, &path.into_inner())?;
    let game = session.lock();

    Ok(HttpResponse::Ok().json(StateResponse {
        success: true,
        game_state: game.state(),
        stats: game.stats(&data.catalog),
    }))
}

#[delete("/api/game/{id}")]
pub async fn end_game(
    data: web::Data<AppState>,
    path: web::Path<SessionId>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    if !data.sessions.remove(&id) {
        return Err(ApiError::SessionNotFound);
    }
    info!("Session {} ended", id);
    Ok(HttpResponse::Ok().json(Ack { success: true }))
}
