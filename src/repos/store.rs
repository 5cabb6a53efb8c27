//! Storage contract for the post feed.
//!
//! The service layer talks to storage only through this trait so it can be
//! handed a Postgres pool in production and an in-memory substitute in tests.
//!
//! Conventions:
//! - "Row not there" is `Ok(None)` / `Ok(false)`, never an `Err`.
//! - `RepoError` is reserved for genuine storage failures and propagates
//!   unmodified (no retry, no partial results).
use async_trait::async_trait;

use crate::repos::error::RepoResult;

/// A stored post as persisted (comment count is never stored).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub text: Option<String>,
    pub tags: Vec<String>,
    pub likes_count: i32,
}

/// One row of a search page.
///
/// `total_count` is the windowed count of every row matching the filter,
/// identical across all rows of the same page. `comments_count` is the
/// correlated per-post comment count, computed in the same query pass.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PagedPostRow {
    pub id: i64,
    pub title: String,
    pub text: Option<String>,
    pub tags: Vec<String>,
    pub likes_count: i32,
    pub total_count: i64,
    pub comments_count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
}

/// Field set for post insert/update (id and likes are storage-managed).
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub text: Option<String>,
    pub tags: Vec<String>,
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Filtered, paginated feed query, one round trip.
    ///
    /// Filter semantics (both predicates ANDed):
    /// - `title_phrase` matches as a case-insensitive substring of the title;
    ///   an empty phrase matches every title.
    /// - the post's tag set must contain every tag in `tags`; an empty `tags`
    ///   matches every post. The empty-set wildcard must be an explicit branch
    ///   in the implementation, not an artifact of the containment operator.
    ///
    /// Rows come back newest-first (descending id), at most `limit` of them,
    /// starting at `offset`.
    async fn find_posts(
        &self,
        title_phrase: &str,
        tags: &[String],
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<PagedPostRow>>;

    async fn find_post(&self, id: i64) -> RepoResult<Option<PostRow>>;

    async fn insert_post(&self, post: &NewPost) -> RepoResult<PostRow>;

    /// Full replace of title/text/tags. `false` when the post does not exist.
    async fn update_post(&self, id: i64, post: &NewPost) -> RepoResult<bool>;

    /// Deletes the post; comments go with it (storage-level cascade).
    async fn delete_post(&self, id: i64) -> RepoResult<bool>;

    /// Server-side `likes_count + 1`, returning the new value.
    /// Atomic at the storage layer so concurrent likes never lose updates.
    async fn increment_likes(&self, id: i64) -> RepoResult<Option<i32>>;

    async fn post_exists(&self, id: i64) -> RepoResult<bool>;

    /// Standalone comment count for one post. Must agree with the
    /// `comments_count` column of `find_posts` for the same state.
    async fn count_comments(&self, post_id: i64) -> RepoResult<i64>;

    async fn insert_comment(&self, post_id: i64, text: &str) -> RepoResult<CommentRow>;

    /// Updates the comment only when it belongs to `post_id`.
    async fn update_comment(&self, comment_id: i64, post_id: i64, text: &str) -> RepoResult<bool>;

    async fn delete_comment(&self, comment_id: i64) -> RepoResult<bool>;

    async fn find_comment(&self, comment_id: i64) -> RepoResult<Option<CommentRow>>;

    /// All comments of one post, newest first.
    async fn find_comments_by_post(&self, post_id: i64) -> RepoResult<Vec<CommentRow>>;
}
