use serde::{Deserialize, Serialize};

use crate::{blogs::repo::Blog, ratings::repo::Rating};

#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub title: String,
    pub author_name: String,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBlogRequest {
    pub title: String,
    pub author_name: String,
    pub body: String,
}

/// Single-blog view: the blog plus every rating referencing its title.
#[derive(Debug, Serialize)]
pub struct BlogWithReviews {
    pub blog: Blog,
    pub reviews: Vec<Rating>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

const MAX_LIMIT: i64 = 100;

impl Pagination {
    /// Postgres rejects negative LIMIT/OFFSET outright; bad values are a
    /// caller error, not a server one.
    pub(crate) fn check(&self) -> Result<(), String> {
        if self.limit < 0 || self.limit > MAX_LIMIT {
            return Err(format!("limit must be between 0 and {}", MAX_LIMIT));
        }
        if self.offset < 0 {
            return Err("offset must not be negative".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn pagination_overrides() {
        let p: Pagination = serde_json::from_str(r#"{"limit": 5, "offset": 10}"#).unwrap();
        assert_eq!(p.limit, 5);
        assert_eq!(p.offset, 10);
    }

    #[test]
    fn pagination_rejects_negative_values() {
        let p: Pagination = serde_json::from_str(r#"{"limit": -1}"#).unwrap();
        assert!(p.check().is_err());

        let p: Pagination = serde_json::from_str(r#"{"offset": -1}"#).unwrap();
        assert!(p.check().is_err());
    }

    #[test]
    fn pagination_rejects_oversized_limit() {
        let p: Pagination = serde_json::from_str(r#"{"limit": 101}"#).unwrap();
        assert!(p.check().is_err());
    }

    #[test]
    fn pagination_accepts_bounds() {
        for body in ["{}", r#"{"limit": 0}"#, r#"{"limit": 100, "offset": 0}"#] {
            let p: Pagination = serde_json::from_str(body).unwrap();
            assert!(p.check().is_ok(), "{} should be valid", body);
        }
    }
}
