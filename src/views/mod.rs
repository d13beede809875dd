/*
 * Responsibility
 * - HTML view の URL 構造を定義
 * - login/register/logout は誰でも、/ (home) は session guard 越し
 */
mod auth;
mod home;
mod pages;

use axum::{Router, middleware, routing::get};

use crate::middleware::session_auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let guarded = Router::new()
        .route("/", get(home::home))
        .route_layer(middleware::from_fn(session_auth::require_session_view));

    Router::new()
        .merge(guarded)
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
}
