/*
 * Responsibility
 * - todos CRUD
 * - 全操作を user_id (owner) でスコープする。他人の id は存在しない扱い (None/false)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow)]
pub struct TodoRow {
    pub id: i64,
    pub name: String,
    pub complete: bool,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[async_trait]
pub trait TodoRepo: Send + Sync {
    /// id 昇順で返す。
    async fn list_by_owner(&self, user_id: Uuid) -> RepoResult<Vec<TodoRow>>;

    async fn get(&self, id: i64, user_id: Uuid) -> RepoResult<Option<TodoRow>>;

    async fn create(&self, name: &str, user_id: Uuid) -> RepoResult<TodoRow>;

    async fn rename(&self, id: i64, user_id: Uuid, name: &str) -> RepoResult<Option<TodoRow>>;

    /// complete を反転して返す。
    async fn toggle(&self, id: i64, user_id: Uuid) -> RepoResult<Option<TodoRow>>;

    async fn delete(&self, id: i64, user_id: Uuid) -> RepoResult<bool>;
}

#[derive(Clone, Debug)]
pub struct PgTodoRepo {
    pool: PgPool,
}

impl PgTodoRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepo for PgTodoRepo {
    async fn list_by_owner(&self, user_id: Uuid) -> RepoResult<Vec<TodoRow>> {
        let rows = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, name, complete, user_id, created_at, updated_at
            FROM todos
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get(&self, id: i64, user_id: Uuid) -> RepoResult<Option<TodoRow>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            SELECT id, name, complete, user_id, created_at, updated_at
            FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, name: &str, user_id: Uuid) -> RepoResult<TodoRow> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            INSERT INTO todos (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, complete, user_id, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn rename(&self, id: i64, user_id: Uuid, name: &str) -> RepoResult<Option<TodoRow>> {
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET name = $3, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, complete, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn toggle(&self, id: i64, user_id: Uuid) -> RepoResult<Option<TodoRow>> {
        // 反転は SQL 側で原子的にやる (read-modify-write にしない)
        let row = sqlx::query_as::<_, TodoRow>(
            r#"
            UPDATE todos
            SET complete = NOT complete, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, complete, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete(&self, id: i64, user_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM todos
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
