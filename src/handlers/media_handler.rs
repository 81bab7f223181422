use std::sync::Arc;

use actix_web::{get, http::header, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError};

#[get("/media/{id}")]
async fn get_media(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let blob = state
        .image_archive
        .load_blob(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Image '{}' not found", id)))?;

    // Ids are content hashes of the source URL, so a stored image never changes.
    Ok(HttpResponse::Ok()
        .content_type(blob.content_type)
        .insert_header((header::CACHE_CONTROL, "public, max-age=31536000, immutable"))
        .body(blob.bytes))
}
