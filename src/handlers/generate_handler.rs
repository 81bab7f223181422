use std::sync::Arc;

use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState, errors::AppError, middleware::get_request_id,
    models::dto::request::GenerateContentRequestDto,
};

#[post("/api/generate")]
async fn generate_content(
    state: web::Data<Arc<AppState>>,
    req: HttpRequest,
    request: web::Json<GenerateContentRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let request_id = get_request_id(&req).unwrap_or_default();
    log::info!("[{}] Generate request for grade {}", request_id, request.grade);

    let response = state.pipeline.run(request).await;
    if !response.errors.is_empty() {
        log::warn!("[{}] Generation degraded: {:?}", request_id, response.errors);
    }

    Ok(HttpResponse::Ok().json(response))
}
