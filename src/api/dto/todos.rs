/*
 * Responsibility
 * - Todos の request/response DTO
 * - validation (形式チェック) 用の validate() を持たせる
 */
use serde::{Deserialize, Serialize};

use crate::repos::todo_repo::TodoRow;

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    // name 欠落はここで空文字にして validate() に落とす (422 ではなく 400 にしたい)
    #[serde(default)]
    pub name: String,
}

impl CreateTodoRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Provide todo text");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct RenameTodoRequest {
    #[serde(default)]
    pub name: String,
}

impl RenameTodoRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Provide todo text");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct TodoResponse {
    pub id: i64,
    pub name: String,
    pub complete: bool,
}

impl From<TodoRow> for TodoResponse {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            complete: row.complete,
        }
    }
}
