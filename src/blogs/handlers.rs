use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::extractors::CurrentUser,
    blogs::{
        dto::{BlogWithReviews, CreateBlogRequest, Pagination, UpdateBlogRequest},
        repo::Blog,
    },
    error::{conflict_on_unique, ApiError},
    ratings::repo::Rating,
    state::AppState,
};

pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blog", get(list_blogs).post(create_blog))
        .route(
            "/blog/:id",
            get(get_blog).put(update_blog).delete(delete_blog),
        )
}

#[instrument(skip(state, _current))]
pub async fn list_blogs(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Blog>>, ApiError> {
    p.check().map_err(ApiError::Validation)?;

    let blogs = Blog::list(&state.db, p.limit, p.offset)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(blogs))
}

#[instrument(skip(state, _current))]
pub async fn get_blog(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<BlogWithReviews>, ApiError> {
    let blog = Blog::find_by_id(&state.db, id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound(format!("blog with id {} not found", id)))?;

    // Ratings reference the blog by title, not id.
    let reviews = Rating::list_by_blog_name(&state.db, &blog.title)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(BlogWithReviews { blog, reviews }))
}

#[instrument(skip(state, current, payload))]
pub async fn create_blog(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<Blog>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::Validation("title must not be empty".into()));
    }
    if payload.author_name.trim().is_empty() {
        return Err(ApiError::Validation("author_name must not be empty".into()));
    }

    let blog = Blog::create(
        &state.db,
        &payload.title,
        &payload.author_name,
        &payload.body,
        &current.email,
    )
    .await
    .map_err(|e| conflict_on_unique(e, "blog already exists"))?;

    info!(blog_id = %blog.id, created_by = %current.email, "blog created");
    Ok((StatusCode::CREATED, Json(blog)))
}

#[instrument(skip(state, _current, payload))]
pub async fn update_blog(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<Json<Blog>, ApiError> {
    let blog = Blog::update(
        &state.db,
        id,
        &payload.title,
        &payload.author_name,
        &payload.body,
    )
    .await
    .map_err(|e| conflict_on_unique(e, "blog already exists"))?
    .ok_or_else(|| ApiError::NotFound(format!("blog with id {} not found", id)))?;

    info!(blog_id = %blog.id, "blog updated");
    Ok(Json(blog))
}

#[instrument(skip(state, current))]
pub async fn delete_blog(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let blog = Blog::find_by_id(&state.db, id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound(format!("blog with id {} not found", id)))?;

    if blog.created_by != current.email {
        warn!(blog_id = %id, requester = %current.email, owner = %blog.created_by, "blog delete denied");
        return Err(ApiError::Forbidden("only the owner may delete a blog".into()));
    }

    Blog::delete(&state.db, id)
        .await
        .map_err(ApiError::Internal)?;

    info!(blog_id = %id, "blog deleted");
    Ok(Json(json!({ "detail": "blog deleted" })))
}
