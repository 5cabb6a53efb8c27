/*
 * Responsibility
 * - PostStore の Postgres 実装 (posts / comments)
 * - comments は posts への FK (CASCADE) 前提で削除挙動を意識
 * - tags は text[] カラム、検索は ILIKE + 配列包含
 */
use async_trait::async_trait;
use sqlx::PgPool;

use crate::repos::error::RepoResult;
use crate::repos::store::{CommentRow, NewPost, PagedPostRow, PostRow, PostStore};

#[derive(Clone)]
pub struct PgPostRepo {
    pool: PgPool,
}

impl PgPostRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostRepo {
    async fn find_posts(
        &self,
        title_phrase: &str,
        tags: &[String],
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<PagedPostRow>> {
        // 空 phrase は "%%" になり全件ワイルドカード。
        let pattern = format!("%{}%", title_phrase);

        // COUNT(*) OVER() でページと同じ 1 パスで総件数を取る (2 回目のクエリ無し)。
        // 空タグ集合の全件マッチは <@ の空集合特性に頼らず、明示的な OR 分岐にする。
        let rows = sqlx::query_as::<_, PagedPostRow>(
            r#"
            SELECT
                p.id,
                p.title,
                p.text,
                p.tags,
                p.likes_count,
                COUNT(*) OVER () AS total_count,
                (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count
            FROM posts p
            WHERE p.title ILIKE $1
              AND ( $2::text[] <@ p.tags
                    OR $3::text[] = ARRAY[]::text[] )
            ORDER BY p.id DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(&pattern)
        .bind(tags)
        .bind(tags)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_post(&self, id: i64) -> RepoResult<Option<PostRow>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, text, tags, likes_count
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn insert_post(&self, post: &NewPost) -> RepoResult<PostRow> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, text, tags, likes_count)
            VALUES ($1, $2, $3, 0)
            RETURNING id, title, text, tags, likes_count
            "#,
        )
        .bind(&post.title)
        .bind(&post.text)
        .bind(&post.tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_post(&self, id: i64, post: &NewPost) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, text = $3, tags = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&post.title)
        .bind(&post.text)
        .bind(&post.tags)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_post(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_likes(&self, id: i64) -> RepoResult<Option<i32>> {
        // インクリメントはサーバ側の read-modify-write 1 文。
        // 読み出し→書き込みの 2 文に分けると並行いいねで更新が消える。
        let likes = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE posts
            SET likes_count = likes_count + 1
            WHERE id = $1
            RETURNING likes_count
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(likes)
    }

    async fn post_exists(&self, id: i64) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM posts WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn count_comments(&self, post_id: i64) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM comments WHERE post_id = $1
            "#,
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn insert_comment(&self, post_id: i64, text: &str) -> RepoResult<CommentRow> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, text)
            VALUES ($1, $2)
            RETURNING id, post_id, text
            "#,
        )
        .bind(post_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_comment(&self, comment_id: i64, post_id: i64, text: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE comments
            SET text = $3
            WHERE id = $1 AND post_id = $2
            "#,
        )
        .bind(comment_id)
        .bind(post_id)
        .bind(text)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_comment(&self, comment_id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_comment(&self, comment_id: i64) -> RepoResult<Option<CommentRow>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, text
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_comments_by_post(&self, post_id: i64) -> RepoResult<Vec<CommentRow>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, text
            FROM comments
            WHERE post_id = $1
            ORDER BY id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
