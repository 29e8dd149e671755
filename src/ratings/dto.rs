use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateRatingRequest {
    pub rating: i32,
    pub blog_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRatingRequest {
    pub rating: i32,
}

/// Update and delete are keyed by the blog's title.
#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

/// Ratings are integers from 1 to 5; anything else is rejected before it
/// can reach storage.
pub(crate) fn valid_rating(value: i32) -> bool {
    (1..=5).contains(&value)
}
