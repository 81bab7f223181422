use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{
        request::{ArchiveStoryRequestDto, StoryListParams},
        response::{ArchiveStoryResponse, StoryListResponse},
    },
};

#[post("/api/archive")]
async fn archive_story(
    state: web::Data<Arc<AppState>>,
    request: web::Json<ArchiveStoryRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let story = request.into_archived_story().ok_or_else(|| {
        AppError::ValidationError("text must contain at least one paragraph".to_string())
    })?;
    let post_id = state.story_archive.archive(story).await?;

    Ok(HttpResponse::Created().json(ArchiveStoryResponse {
        success: true,
        post_id,
    }))
}

#[get("/api/stories")]
async fn list_stories(
    state: web::Data<Arc<AppState>>,
    query: web::Query<StoryListParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    params.validate()?;

    let (items, total) = state
        .story_archive
        .list(
            params.category().map(str::to_string),
            params.search().map(str::to_string),
            params.offset(),
            params.limit(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(StoryListResponse {
        items,
        total,
        offset: params.offset(),
        limit: params.limit(),
    }))
}

#[get("/api/stories/{id}")]
async fn get_story(
    state: web::Data<Arc<AppState>>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let story = state
        .story_archive
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Story '{}' not found", id)))?;

    Ok(HttpResponse::Ok().json(story))
}
