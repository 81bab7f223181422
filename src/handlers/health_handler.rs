use std::sync::Arc;

use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
async fn health_check_ready(state: web::Data<Arc<AppState>>) -> HttpResponse {
    let db_ok = match &state.db {
        Some(db) => db.health_check().await.is_ok(),
        None => false,
    };

    let status = if db_ok { "ready" } else { "not_ready" };

    let response = serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_ok { "ok" } else { "error" },
            "text_provider": if state.config.openai_api_key.is_some() { "configured" } else { "fallback" },
            "image_provider": if state.config.pixabay_api_key.is_some() { "configured" } else { "fallback" }
        }
    });

    if db_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[get("/health/live")]
async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
