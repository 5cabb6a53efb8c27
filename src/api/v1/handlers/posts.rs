/*
 * Responsibility
 * - /posts 系 handler (フィード検索 + CRUD + likes)
 * - DTO validation → service 呼び出し → response 整形
 * - "無い" は 404、storage 障害は From<RepoError> 経由で 500
 */
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::posts::{PageQuery, PostRequest, PostResponse, PostsPageResponse},
    error::AppError,
    repos::store::NewPost,
    services::post_service::{PostView, PostsPage},
    state::AppState,
};

fn view_to_response(view: PostView) -> PostResponse {
    PostResponse {
        id: view.id,
        title: view.title,
        text: view.text,
        tags: view.tags,
        likes_count: view.likes_count,
        comments_count: view.comments_count,
    }
}

fn page_to_response(page: PostsPage) -> PostsPageResponse {
    PostsPageResponse {
        posts: page.posts.into_iter().map(view_to_response).collect(),
        has_prev: page.has_prev,
        has_next: page.has_next,
        last_page: page.last_page,
    }
}

fn request_to_new_post(req: PostRequest) -> NewPost {
    NewPost {
        title: req.title,
        text: req.text,
        tags: req.tags,
    }
}

pub async fn get_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PostsPageResponse>, AppError> {
    query
        .validate()
        .map_err(|msg| AppError::bad_request("INVALID_PAGE_PARAMS", msg))?;

    let page = state
        .posts
        .get_posts(&query.search, query.page_number, query.page_size)
        .await?;

    Ok(Json(page_to_response(page)))
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(req): Json<PostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_POST", msg))?;

    let view = state.posts.create_post(request_to_new_post(req)).await?;

    Ok((StatusCode::CREATED, Json(view_to_response(view))))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<PostResponse>, AppError> {
    let view = state
        .posts
        .get_post(post_id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    Ok(Json(view_to_response(view)))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(req): Json<PostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_POST", msg))?;

    let view = state
        .posts
        .update_post(post_id, request_to_new_post(req))
        .await?
        .ok_or(AppError::not_found("post"))?;

    Ok(Json(view_to_response(view)))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.posts.delete_post(post_id).await? {
        // 既存クライアント互換のため 204 ではなく 200
        Ok(StatusCode::OK)
    } else {
        Err(AppError::not_found("post"))
    }
}

pub async fn increment_likes(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<i32>, AppError> {
    let likes = state
        .posts
        .increment_likes(post_id)
        .await?
        .ok_or(AppError::not_found("post"))?;

    Ok(Json(likes))
}
