/*
 * Responsibility
 * - /api/todos 配下の URL 構造を定義
 * - session guard が必要な範囲を route_layer で掛ける設計もここで決める
 */
use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::api::handlers::todos::{
    create_todo, delete_todo, get_todo, list_todos, rename_todo, toggle_todo,
};
use crate::middleware::session_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route(
            "/{todo_id}",
            get(get_todo).put(rename_todo).delete(delete_todo),
        )
        .route("/mark/{todo_id}", put(toggle_todo))
        .route_layer(middleware::from_fn(session_auth::require_session_api))
}
