/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /posts, /posts/{id}/comments を nest/merge
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    comments::{create_comment, delete_comment, get_comment, list_comments, update_comment},
    health::health,
    posts::{create_post, delete_post, get_post, get_posts, increment_likes, update_post},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/posts", get(get_posts).post(create_post))
        .route(
            "/posts/{post_id}",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route("/posts/{post_id}/likes", post(increment_likes))
        .route(
            "/posts/{post_id}/comments",
            get(list_comments).post(create_comment),
        )
        .route(
            "/posts/{post_id}/comments/{comment_id}",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}
