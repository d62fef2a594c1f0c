use actix_web::{get, web, HttpResponse, Responder};
use log::debug;

use crate::models::{AppState, CategoriesResponse, HealthResponse};

#[get("/api/categories")]
pub async fn get_categories(data: web::Data<AppState>) -> impl Responder {
    let categories = data.catalog.categories();
    debug!("Returning {} categories", categories.len());
    HttpResponse::Ok().json(CategoriesResponse {
        success: true,
        categories,
    })
}

#[get("/api/health")]
pub async fn health(data: web::Data<AppState>) -> impl Responder {
    let categories_count = data.catalog.categories().len();
    HttpResponse::Ok().json(HealthResponse {
        success: true,
        categories_loaded: categories_count > 0,
        categories_count,
        active_sessions: data.sessions.len(),
    })
}
