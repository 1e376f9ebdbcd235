//! Handlers for the blog post resource.

use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use blogpost_core::blog::{resource_path, ENTITY};
use blogpost_core::error::CoreError;
use blogpost_core::types::DbId;
use blogpost_db::models::blog_post::{BlogPost, BlogPostInput};
use blogpost_db::repositories::BlogPostRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<BlogPost>>> {
    let posts = BlogPostRepo::list(&state.store).await?;
    Ok(Json(posts))
}

/// GET /blog/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<BlogPost>> {
    let post = BlogPostRepo::find_by_id(&state.store, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(post))
}

/// POST /blog
///
/// Any `id` in the body is ignored; the store assigns one.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<BlogPostInput>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::create(&state.store, &input.title).await?;
    tracing::info!(id = post.id, "Blog post created");
    Ok((
        StatusCode::CREATED,
        [(LOCATION, resource_path(post.id))],
        Json(post),
    ))
}

/// PUT /blog/{id}
///
/// Only the title changes. The path id wins over any id in the body.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<BlogPostInput>,
) -> AppResult<StatusCode> {
    if let Some(body_id) = input.id.filter(|body_id| *body_id != id) {
        tracing::debug!(path_id = id, body_id, "Ignoring mismatched id in request body");
    }

    if BlogPostRepo::update(&state.store, id, &input.title).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// DELETE /blog/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if BlogPostRepo::delete(&state.store, id).await? {
        tracing::info!(id, "Blog post deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
