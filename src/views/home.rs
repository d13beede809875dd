/*
 * Responsibility
 * - GET / (home view)
 * - session には user_id しか無いので、User は毎回 repo から引き直す
 */
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::{api::extractors::AuthCtxExtractor, error::AppError, state::AppState, views::pages};

pub async fn home(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Response, AppError> {
    // session が指す user が消えていたら匿名扱い
    let Some(user) = state.users.get(ctx.user_id).await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    Ok(pages::home(&user.email).into_response())
}
