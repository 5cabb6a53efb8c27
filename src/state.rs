/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use crate::services::post_service::PostService;

#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    pub fn new(posts: PostService) -> Self {
        Self { posts }
    }
}
