use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::{
    auth::extractors::CurrentUser,
    blogs::repo::Blog,
    error::ApiError,
    ratings::{
        dto::{valid_rating, CreateRatingRequest, TitleQuery, UpdateRatingRequest},
        repo::Rating,
    },
    state::AppState,
};

pub fn rating_routes() -> Router<AppState> {
    Router::new()
        .route("/rating", post(create_rating))
        .route("/rating/rating", get(list_ratings))
        .route("/rating/update", put(update_rating))
        .route("/rating/delete", delete(delete_rating))
}

#[instrument(skip(state, current, payload))]
pub async fn create_rating(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Json(payload): Json<CreateRatingRequest>,
) -> Result<(StatusCode, Json<Rating>), ApiError> {
    if !valid_rating(payload.rating) {
        return Err(ApiError::Validation("rating must be between 1 and 5".into()));
    }

    if Blog::find_by_title(&state.db, &payload.blog_name)
        .await
        .map_err(ApiError::Internal)?
        .is_none()
    {
        return Err(ApiError::NotFound(format!(
            "blog with title '{}' does not exist",
            payload.blog_name
        )));
    }

    // The rater is always the authenticated user.
    let rating = Rating::create(&state.db, payload.rating, &current.email, &payload.blog_name)
        .await
        .map_err(ApiError::Internal)?;

    info!(rating_id = %rating.id, email = %current.email, "rating created");
    Ok((StatusCode::CREATED, Json(rating)))
}

#[instrument(skip(state, _current))]
pub async fn list_ratings(
    State(state): State<AppState>,
    CurrentUser(_current): CurrentUser,
) -> Result<Json<Vec<Rating>>, ApiError> {
    let ratings = Rating::list_all(&state.db)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(ratings))
}

#[instrument(skip(state, current, payload))]
pub async fn update_rating(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Query(q): Query<TitleQuery>,
    Json(payload): Json<UpdateRatingRequest>,
) -> Result<Json<Rating>, ApiError> {
    if !valid_rating(payload.rating) {
        return Err(ApiError::Validation("rating must be between 1 and 5".into()));
    }

    let rating = Rating::find_by_blog_and_email(&state.db, &q.title, &current.email)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            ApiError::NotFound(format!("no rating of '{}' by {}", q.title, current.email))
        })?;

    let updated = Rating::update_value(&state.db, rating.id, payload.rating)
        .await
        .map_err(ApiError::Internal)?;

    info!(rating_id = %updated.id, email = %current.email, "rating updated");
    Ok(Json(updated))
}

#[instrument(skip(state, current))]
pub async fn delete_rating(
    State(state): State<AppState>,
    CurrentUser(current): CurrentUser,
    Query(q): Query<TitleQuery>,
) -> Result<Json<Value>, ApiError> {
    let owned = Rating::find_by_blog_and_email(&state.db, &q.title, &current.email)
        .await
        .map_err(ApiError::Internal)?;

    let rating = match owned {
        Some(r) => r,
        None => {
            // Ratings of this title exist, just not the requester's.
            return if Rating::find_any_by_blog_name(&state.db, &q.title)
                .await
                .map_err(ApiError::Internal)?
                .is_some()
            {
                warn!(title = %q.title, requester = %current.email, "rating delete denied");
                Err(ApiError::Forbidden(
                    "only the rater may delete a rating".into(),
                ))
            } else {
                Err(ApiError::NotFound(format!(
                    "no rating for blog '{}'",
                    q.title
                )))
            };
        }
    };

    Rating::delete(&state.db, rating.id)
        .await
        .map_err(ApiError::Internal)?;

    info!(rating_id = %rating.id, email = %current.email, "rating deleted");
    Ok(Json(json!({ "detail": "rating deleted" })))
}
