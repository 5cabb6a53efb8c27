/*
 * Responsibility
 * - フィード検索 (tokenize → store 1 クエリ → ページ境界 → 整形) の本体
 * - posts / comments CRUD のオーケストレーション
 * - "無い" は Option、storage 障害は RepoError のまま上へ
 */
use std::sync::Arc;

use crate::repos::error::RepoResult;
use crate::repos::store::{CommentRow, NewPost, PostRow, PostStore};
use crate::services::search::SearchTerms;

/// Body text longer than this many characters gets cut down for feed pages.
/// Strictly "more than": a 128-character text is returned untouched.
const PREVIEW_MAX_CHARS: usize = 128;
const PREVIEW_ELLIPSIS: &str = "...";

/// A response-ready post: possibly truncated text, derived comment count.
#[derive(Debug, Clone)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub text: Option<String>,
    pub tags: Vec<String>,
    pub likes_count: i32,
    pub comments_count: i64,
}

/// One feed page plus its pagination boundary fields.
#[derive(Debug, Clone)]
pub struct PostsPage {
    pub posts: Vec<PostView>,
    pub has_prev: bool,
    pub has_next: bool,
    pub last_page: i64,
}

#[derive(Debug, Clone)]
pub struct CommentView {
    pub id: i64,
    pub post_id: i64,
    pub text: String,
}

/// Pagination boundaries derived from the page request and the windowed
/// total-match count. `total_count` is 0 when the page came back empty (the
/// windowed count only exists on returned rows), which also makes
/// `last_page` 0 and `has_next` false in that case.
fn page_bounds(page_number: i64, page_size: i64, total_count: i64) -> (bool, bool, i64) {
    let last_page = if total_count == 0 {
        0
    } else {
        // `i64::div_ceil` is unstable (`int_roundings`); same computation.
        let (d, r) = (total_count / page_size, total_count % page_size);
        if (r > 0 && page_size > 0) || (r < 0 && page_size < 0) {
            d + 1
        } else {
            d
        }
    };
    let has_prev = page_number > 1;
    let has_next = page_number < last_page;

    (has_prev, has_next, last_page)
}

/// Cut `text` to its first 127 characters plus `"..."` when it is longer than
/// 128 characters. The result of a cut is always 130 characters, never 128.
fn truncate_preview(text: String) -> String {
    if text.chars().count() > PREVIEW_MAX_CHARS {
        let cut: String = text.chars().take(PREVIEW_MAX_CHARS - 1).collect();
        format!("{cut}{PREVIEW_ELLIPSIS}")
    } else {
        text
    }
}

fn post_view(row: PostRow, comments_count: i64) -> PostView {
    PostView {
        id: row.id,
        title: row.title,
        text: row.text,
        tags: row.tags,
        likes_count: row.likes_count,
        comments_count,
    }
}

fn comment_view(row: CommentRow) -> CommentView {
    CommentView {
        id: row.id,
        post_id: row.post_id,
        text: row.text,
    }
}

/// Stateless query/command layer over an injected [`PostStore`].
///
/// Safe to call concurrently; every call owns its parameters and result.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Feed search: one storage round trip returning the page rows, the
    /// windowed total and per-row comment counts, then page boundary math and
    /// text truncation on top.
    ///
    /// Preconditions (caller-validated): `page_number >= 1`, `page_size >= 1`.
    pub async fn get_posts(
        &self,
        search: &str,
        page_number: i64,
        page_size: i64,
    ) -> RepoResult<PostsPage> {
        let terms = SearchTerms::parse(search);
        let offset = (page_number - 1) * page_size;

        let rows = self
            .store
            .find_posts(&terms.title_phrase, &terms.tags, page_size, offset)
            .await?;

        // total_count はページ内の全行で同一。先頭行から読む。
        let total_count = rows.first().map_or(0, |row| row.total_count);
        let (has_prev, has_next, last_page) = page_bounds(page_number, page_size, total_count);

        let posts = rows
            .into_iter()
            .map(|row| PostView {
                id: row.id,
                title: row.title,
                text: row.text.map(truncate_preview),
                tags: row.tags,
                likes_count: row.likes_count,
                comments_count: row.comments_count,
            })
            .collect();

        Ok(PostsPage {
            posts,
            has_prev,
            has_next,
            last_page,
        })
    }

    /// Single post by id, with the standalone comment-count lookup.
    /// Text is returned in full here (no truncation).
    pub async fn get_post(&self, id: i64) -> RepoResult<Option<PostView>> {
        let Some(row) = self.store.find_post(id).await? else {
            return Ok(None);
        };
        let comments_count = self.store.count_comments(id).await?;

        Ok(Some(post_view(row, comments_count)))
    }

    pub async fn create_post(&self, post: NewPost) -> RepoResult<PostView> {
        let row = self.store.insert_post(&post).await?;

        // 新規ポストにコメントはまだ無い
        Ok(post_view(row, 0))
    }

    pub async fn update_post(&self, id: i64, post: NewPost) -> RepoResult<Option<PostView>> {
        if !self.store.update_post(id, &post).await? {
            return Ok(None);
        }
        self.get_post(id).await
    }

    pub async fn delete_post(&self, id: i64) -> RepoResult<bool> {
        self.store.delete_post(id).await
    }

    pub async fn increment_likes(&self, id: i64) -> RepoResult<Option<i32>> {
        self.store.increment_likes(id).await
    }

    pub async fn comments_for_post(&self, post_id: i64) -> RepoResult<Vec<CommentView>> {
        let rows = self.store.find_comments_by_post(post_id).await?;

        Ok(rows.into_iter().map(comment_view).collect())
    }

    /// A comment addressed through the wrong post id is treated as not found.
    pub async fn get_comment(
        &self,
        post_id: i64,
        comment_id: i64,
    ) -> RepoResult<Option<CommentView>> {
        let row = self.store.find_comment(comment_id).await?;

        Ok(row.filter(|c| c.post_id == post_id).map(comment_view))
    }

    pub async fn add_comment(&self, post_id: i64, text: &str) -> RepoResult<Option<CommentView>> {
        if !self.store.post_exists(post_id).await? {
            return Ok(None);
        }
        let row = self.store.insert_comment(post_id, text).await?;

        Ok(Some(comment_view(row)))
    }

    pub async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        text: &str,
    ) -> RepoResult<Option<CommentView>> {
        let Some(existing) = self.get_comment(post_id, comment_id).await? else {
            return Ok(None);
        };
        // チェックと更新の間に消えた場合も not found
        if !self.store.update_comment(comment_id, post_id, text).await? {
            return Ok(None);
        }

        Ok(Some(CommentView {
            id: existing.id,
            post_id,
            text: text.to_string(),
        }))
    }

    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> RepoResult<bool> {
        if self.get_comment(post_id, comment_id).await?.is_none() {
            return Ok(false);
        }
        self.store.delete_comment(comment_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_is_ceiling_of_total_over_page_size() {
        let (_, _, last) = page_bounds(1, 3, 10);
        assert_eq!(last, 4);

        let (_, _, last) = page_bounds(1, 3, 9);
        assert_eq!(last, 3);

        let (_, _, last) = page_bounds(1, 10, 2);
        assert_eq!(last, 1);
    }

    #[test]
    fn zero_matches_means_page_zero_and_no_next() {
        let (has_prev, has_next, last) = page_bounds(1, 10, 0);

        assert_eq!(last, 0);
        assert!(!has_prev);
        assert!(!has_next);
    }

    #[test]
    fn has_prev_depends_only_on_page_number() {
        let (has_prev, _, _) = page_bounds(1, 10, 100);
        assert!(!has_prev);

        let (has_prev, _, _) = page_bounds(2, 10, 100);
        assert!(has_prev);

        // ページ範囲外でも page_number だけで決まる
        let (has_prev, _, _) = page_bounds(99, 10, 0);
        assert!(has_prev);
    }

    #[test]
    fn has_next_iff_page_number_below_last_page() {
        let (_, has_next, _) = page_bounds(1, 10, 25);
        assert!(has_next);

        let (_, has_next, _) = page_bounds(3, 10, 25);
        assert!(!has_next);

        let (_, has_next, _) = page_bounds(4, 10, 25);
        assert!(!has_next);
    }

    #[test]
    fn text_of_exactly_128_chars_is_untouched() {
        let text = "x".repeat(128);

        assert_eq!(truncate_preview(text.clone()), text);
    }

    #[test]
    fn text_of_129_chars_is_cut_to_130() {
        let text = "x".repeat(129);
        let cut = truncate_preview(text);

        assert_eq!(cut.chars().count(), 130);
        assert!(cut.ends_with("..."));
        assert!(cut.starts_with(&"x".repeat(127)));
    }

    #[test]
    fn short_and_empty_text_is_untouched() {
        assert_eq!(truncate_preview(String::new()), "");
        assert_eq!(truncate_preview("hi".to_string()), "hi");
        let text = "x".repeat(127);
        assert_eq!(truncate_preview(text.clone()), text);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        // 2 バイト文字でも 130 文字に切る (バイト境界 panic もしない)
        let text = "й".repeat(200);
        let cut = truncate_preview(text);

        assert_eq!(cut.chars().count(), 130);
        assert!(cut.ends_with("..."));
    }
}
