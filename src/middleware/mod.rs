/*
 * Responsibility
 * - request 前処理 (session auth guard) の公開ポイント
 */
pub mod session_auth;
