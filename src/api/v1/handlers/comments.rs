/*
 * Responsibility
 * - /posts/{postId}/comments 系 handler
 * - comment は必ず親 post 経由で扱う (post_id 不一致は 404)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::v1::dto::comments::{CommentRequest, CommentResponse},
    error::AppError,
    services::post_service::CommentView,
    state::AppState,
};

fn view_to_response(view: CommentView) -> CommentResponse {
    CommentResponse {
        id: view.id,
        text: view.text,
        post_id: view.post_id,
    }
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let views = state.posts.comments_for_post(post_id).await?;

    Ok(Json(views.into_iter().map(view_to_response).collect()))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<Json<CommentResponse>, AppError> {
    let view = state
        .posts
        .get_comment(post_id, comment_id)
        .await?
        .ok_or(AppError::not_found("comment"))?;

    Ok(Json(view_to_response(view)))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_COMMENT", msg))?;

    let view = state
        .posts
        .add_comment(post_id, &req.text)
        .await?
        .ok_or(AppError::not_found("post"))?;

    Ok((StatusCode::CREATED, Json(view_to_response(view))))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
    Json(req): Json<CommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_COMMENT", msg))?;

    let view = state
        .posts
        .update_comment(post_id, comment_id, &req.text)
        .await?
        .ok_or(AppError::not_found("comment"))?;

    Ok(Json(view_to_response(view)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    if state.posts.delete_comment(post_id, comment_id).await? {
        Ok(StatusCode::OK)
    } else {
        Err(AppError::not_found("comment"))
    }
}
