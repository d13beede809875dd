//! register / login / logout の view handler。
//!
//! 失敗 (必須項目なし・user なし・password 不一致) はエラーメッセージ付きで
//! ページを再描画する (200)。status code ではなく文言で伝えるのが view 面の契約。
//! password は再描画時にフォームへ戻さない。
//!
//! login 成功時の session 書き込みは SessionManagerLayer がレスポンスを返す前に
//! store へ永続化する。

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    error::AppError,
    middleware::session_auth::SESSION_USER_ID_KEY,
    repos::error::RepoError,
    services::password,
    state::AppState,
    views::pages,
};

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsForm {
    fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err("Please submit all required fields");
        }
        Ok(())
    }
}

pub async fn register_page() -> Html<String> {
    pages::register(None)
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    if let Err(msg) = form.validate() {
        return Ok(pages::register(Some(msg)).into_response());
    }

    let hash = password::hash(form.password).await?;

    // email の重複は事前チェックせず、unique 制約違反 (Conflict) を拾って伝える
    match state.users.create(form.email.trim(), &hash).await {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(RepoError::Conflict) => {
            Ok(pages::register(Some("That email is already registered")).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn login_page() -> Html<String> {
    pages::login(None)
}

pub async fn login(
    session: Session,
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    if let Err(msg) = form.validate() {
        return Ok(pages::login(Some(msg)).into_response());
    }

    let Some(user) = state.users.find_by_email(form.email.trim()).await? else {
        return Ok(pages::login(Some("No user with that email")).into_response());
    };

    if !password::verify(form.password, user.password_hash).await? {
        return Ok(pages::login(Some("Incorrect password. Please try again")).into_response());
    }

    // session fixation 対策: 書き込む前に session id を切り替える
    session.cycle_id().await.map_err(session_err)?;
    session
        .insert(SESSION_USER_ID_KEY, user.id)
        .await
        .map_err(session_err)?;

    Ok(Redirect::to("/").into_response())
}

pub async fn logout(session: Session) -> Result<Redirect, AppError> {
    // 未ログインでも成功する (存在しないキーの remove は no-op)
    session
        .remove::<Uuid>(SESSION_USER_ID_KEY)
        .await
        .map_err(session_err)?;

    Ok(Redirect::to("/login"))
}

fn session_err(err: tower_sessions::session::Error) -> AppError {
    tracing::error!(error = ?err, "session store failure");
    AppError::Internal
}
