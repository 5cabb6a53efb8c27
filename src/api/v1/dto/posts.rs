/*
 * Responsibility
 * - Posts の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 * - JSON のフィールド名は camelCase (既存クライアント互換)
 */
use serde::{Deserialize, Serialize};

/// Query params of `GET /posts`. `search` may be empty (full wildcard);
/// the page params are validated before anything reaches storage.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub search: String,
    #[serde(rename = "pageNumber")]
    pub page_number: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
}

impl PageQuery {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.page_number < 1 {
            return Err("pageNumber must be >= 1");
        }
        if self.page_size < 1 {
            return Err("pageSize must be >= 1");
        }
        Ok(())
    }
}

/// Body of post create/update (full replace on update).
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub text: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PostRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub text: Option<String>,
    pub tags: Vec<String>,
    pub likes_count: i32,
    pub comments_count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsPageResponse {
    pub posts: Vec<PostResponse>,
    pub has_prev: bool,
    pub has_next: bool,
    pub last_page: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_query(page_number: i64, page_size: i64) -> PageQuery {
        PageQuery {
            search: String::new(),
            page_number,
            page_size,
        }
    }

    #[test]
    fn page_params_below_one_are_rejected() {
        assert!(page_query(0, 10).validate().is_err());
        assert!(page_query(1, 0).validate().is_err());
        assert!(page_query(-1, 10).validate().is_err());
        assert!(page_query(1, 10).validate().is_ok());
    }

    #[test]
    fn post_request_requires_title() {
        let req = PostRequest {
            title: "  ".to_string(),
            text: None,
            tags: vec![],
        };
        assert!(req.validate().is_err());
    }
}
