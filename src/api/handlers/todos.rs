/*
 * Responsibility
 * - /api/todos 系 CRUD handler
 * - Path/Json を extractor で受け、DTO validation → repo 呼び出し
 * - 全操作を AuthCtx の user_id でスコープする。他人の todo は 404 (存在を漏らさない)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    api::{
        dto::todos::{CreateTodoRequest, RenameTodoRequest, TodoResponse},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

pub async fn list_todos(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<Vec<TodoResponse>>, AppError> {
    let rows = state.todos.list_by_owner(ctx.user_id).await?;
    let res = rows.into_iter().map(TodoResponse::from).collect();

    Ok(Json(res))
}

pub async fn get_todo(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(todo_id): Path<i64>,
) -> Result<Json<TodoResponse>, AppError> {
    let row = state
        .todos
        .get(todo_id, ctx.user_id)
        .await?
        .ok_or(AppError::not_found("todo"))?;

    Ok(Json(row.into()))
}

pub async fn create_todo(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Json(req): Json<CreateTodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_TODO", msg))?;

    let row = state.todos.create(&req.name, ctx.user_id).await?;

    Ok(Json(row.into()))
}

pub async fn rename_todo(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(todo_id): Path<i64>,
    Json(req): Json<RenameTodoRequest>,
) -> Result<Json<TodoResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_TODO", msg))?;

    let row = state
        .todos
        .rename(todo_id, ctx.user_id, &req.name)
        .await?
        .ok_or(AppError::not_found("todo"))?;

    Ok(Json(row.into()))
}

pub async fn toggle_todo(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(todo_id): Path<i64>,
) -> Result<Json<TodoResponse>, AppError> {
    let row = state
        .todos
        .toggle(todo_id, ctx.user_id)
        .await?
        .ok_or(AppError::not_found("todo"))?;

    Ok(Json(row.into()))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(todo_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = state.todos.delete(todo_id, ctx.user_id).await?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("todo"))
    }
}
