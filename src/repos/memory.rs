/*
 * Responsibility
 * - handler テスト用の in-memory repo 実装
 * - Postgres 実装と同じ契約 (owner スコープ / id 昇順 list / email unique は Conflict)
 */
use std::sync::{
    Mutex,
    atomic::{AtomicI64, Ordering},
};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::todo_repo::{TodoRepo, TodoRow};
use crate::repos::user_repo::{UserRepo, UserRow};

#[derive(Default)]
pub struct MemoryUserRepo {
    rows: Mutex<Vec<UserRow>>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create(&self, email: &str, password_hash: &str) -> RepoResult<UserRow> {
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|u| u.email == email) {
            return Err(RepoError::Conflict);
        }

        let now = Utc::now();
        let row = UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());

        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserRow>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<UserRow>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|u| u.id == id).cloned())
    }
}

pub struct MemoryTodoRepo {
    rows: Mutex<Vec<TodoRow>>,
    next_id: AtomicI64,
}

impl MemoryTodoRepo {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl TodoRepo for MemoryTodoRepo {
    async fn list_by_owner(&self, user_id: Uuid) -> RepoResult<Vec<TodoRow>> {
        let rows = self.rows.lock().unwrap();
        let mut out: Vec<TodoRow> = rows.iter().filter(|t| t.user_id == user_id).cloned().collect();
        out.sort_by_key(|t| t.id);
        Ok(out)
    }

    async fn get(&self, id: i64, user_id: Uuid) -> RepoResult<Option<TodoRow>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .cloned())
    }

    async fn create(&self, name: &str, user_id: Uuid) -> RepoResult<TodoRow> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let row = TodoRow {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
            complete: false,
            user_id,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());

        Ok(row)
    }

    async fn rename(&self, id: i64, user_id: Uuid, name: &str) -> RepoResult<Option<TodoRow>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|t| t.id == id && t.user_id == user_id) else {
            return Ok(None);
        };

        row.name = name.to_string();
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn toggle(&self, id: i64, user_id: Uuid) -> RepoResult<Option<TodoRow>> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|t| t.id == id && t.user_id == user_id) else {
            return Ok(None);
        };

        row.complete = !row.complete;
        row.updated_at = Utc::now();

        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64, user_id: Uuid) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|t| !(t.id == id && t.user_id == user_id));

        Ok(rows.len() < before)
    }
}
