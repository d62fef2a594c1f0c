pub mod catalog;
pub mod game;
pub mod scores;

use actix_web::web;

use crate::error::ApiError;

/// Register every endpoint along with JSON/path extractor error mapping.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(web::PathConfig::default().error_handler(|_err, _req| ApiError::SessionNotFound.into()))
    .service(game::start_game)
    .service(game::guess_letter)
    .service(game::get_hint)
    .service(game::get_state)
    .service(game::end_game)
    .service(catalog::get_categories)
    .service(catalog::health)
    .service(scores::get_scores)
    .service(scores::save_score);
}
