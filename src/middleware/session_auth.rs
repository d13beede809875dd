//! session から認証状態を解決し、AuthCtx を extensions に入れる。
//!
//! 拒否のしかたは面ごとに違う：
//! - API (`/api/todos` 配下) は 401 を返す。API クライアントは redirect ではなく
//!   status code を期待する
//! - view (`GET /`) はブラウザ向けに `/login` へ redirect する
//!
//! session には user_id (Uuid) しか入れない。User レコード本体は handler が
//! 毎リクエスト repo から引き直す。

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use uuid::Uuid;

use crate::api::extractors::AuthCtx;
use crate::error::AppError;

/// session に authenticated user を入れるときのキー。
pub const SESSION_USER_ID_KEY: &str = "user_id";

pub async fn require_session_api(
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user_id) = resolve_user_id(&session).await? else {
        return Err(AppError::Unauthorized);
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(user_id));

    Ok(next.run(req).await)
}

pub async fn require_session_view(
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(user_id) = resolve_user_id(&session).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    req.extensions_mut().insert(AuthCtx::new(user_id));

    Ok(next.run(req).await)
}

async fn resolve_user_id(session: &Session) -> Result<Option<Uuid>, AppError> {
    session
        .get::<Uuid>(SESSION_USER_ID_KEY)
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, "session load failed");
            AppError::Internal
        })
}
