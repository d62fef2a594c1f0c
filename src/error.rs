use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::services::game::{GuessError, HintError, StartError};
use crate::services::score_store::ScoreError;

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    code: &'static str,
}

/// Errors returned to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("game session not found")]
    SessionNotFound,
    #[error(transparent)]
    Start(#[from] StartError),
    #[error(transparent)]
    Guess(#[from] GuessError),
    #[error(transparent)]
    Hint(#[from] HintError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::SessionNotFound => "SESSION_NOT_FOUND",
            ApiError::Start(StartError::NoWordAvailable) => "NO_WORD_AVAILABLE",
            ApiError::Guess(GuessError::GameOver) | ApiError::Hint(HintError::GameOver) => {
                "GAME_OVER"
            }
            ApiError::Guess(GuessError::InvalidLetter) => "INVALID_LETTER",
            ApiError::Guess(GuessError::AlreadyUsed) => "ALREADY_USED",
            ApiError::Hint(HintError::InsufficientScore) => "INSUFFICIENT_SCORE",
            ApiError::Hint(HintError::NoMissingLetters) => "NO_MISSING_LETTERS",
            ApiError::Score(ScoreError::InvalidName) => "INVALID_SCORE",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Score(ScoreError::Io(_)) | ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionNotFound => StatusCode::NOT_FOUND,
            ApiError::Score(ScoreError::Io(_)) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(ErrorBody {
            success: false,
            error: self.to_string(),
            code: self.code(),
        })
    }
}
