/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - repos は trait object で持ち、テストでは in-memory 実装に差し替える
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::repos::{todo_repo::TodoRepo, user_repo::UserRepo};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub todos: Arc<dyn TodoRepo>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepo>, todos: Arc<dyn TodoRepo>) -> Self {
        Self { users, todos }
    }
}
