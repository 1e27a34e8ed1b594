//! # TodoItemRepository
//!
//! Todo アイテムの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **ストア側採番**: ID と作成日時は `INSERT ... RETURNING` で確定した値を返す
//! - **完了済み一括削除**: 1 文の `DELETE` で実行し、削除件数を返す
//! - **実行時クエリ**: `sqlx::query_as` + [`sqlx::FromRow`] でマッピングする

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use todolist_domain::todo_item::{NewTodoItem, TodoItem, TodoItemId, TodoText};

use crate::error::InfraError;

/// Todo アイテムリポジトリトレイト
#[async_trait]
pub trait TodoItemRepository: Send + Sync {
    /// 全アイテムを ID 昇順で取得する
    async fn find_all(&self) -> Result<Vec<TodoItem>, InfraError>;

    /// ID でアイテムを検索する
    async fn find_by_id(&self, id: TodoItemId) -> Result<Option<TodoItem>, InfraError>;

    /// アイテムを挿入し、採番された ID を含む永続化後の状態を返す
    async fn insert(&self, item: &NewTodoItem) -> Result<TodoItem, InfraError>;

    /// アイテムの本文・完了フラグ・更新日時を保存する
    ///
    /// 対象行が存在しなかった場合は `false` を返す。
    async fn update(&self, item: &TodoItem) -> Result<bool, InfraError>;

    /// 完了済みアイテムをすべて削除し、削除件数を返す
    async fn delete_completed(&self) -> Result<u64, InfraError>;
}

/// `todo_items` テーブルの 1 行
#[derive(Debug, sqlx::FromRow)]
struct TodoItemRow {
    id:           i32,
    todo:         String,
    is_completed: bool,
    created_at:   DateTime<Utc>,
    updated_at:   DateTime<Utc>,
}

impl TryFrom<TodoItemRow> for TodoItem {
    type Error = InfraError;

    fn try_from(row: TodoItemRow) -> Result<Self, Self::Error> {
        let text = TodoText::new(row.todo).map_err(|e| {
            InfraError::unexpected(format!("不正な Todo 本文が格納されています (id={}): {e}", row.id))
        })?;

        Ok(TodoItem::from_db(
            TodoItemId::from_i32(row.id),
            text,
            row.is_completed,
            row.created_at,
            row.updated_at,
        ))
    }
}

/// PostgreSQL 実装の TodoItemRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoItemRepository {
    pool: PgPool,
}

impl PostgresTodoItemRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoItemRepository for PostgresTodoItemRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<TodoItem>, InfraError> {
        let rows = sqlx::query_as::<_, TodoItemRow>(
            r#"
            SELECT id, todo, is_completed, created_at, updated_at
            FROM todo_items
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TodoItem::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: TodoItemId) -> Result<Option<TodoItem>, InfraError> {
        let row = sqlx::query_as::<_, TodoItemRow>(
            r#"
            SELECT id, todo, is_completed, created_at, updated_at
            FROM todo_items
            WHERE id = $1
            "#,
        )
        .bind(id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TodoItem::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, item: &NewTodoItem) -> Result<TodoItem, InfraError> {
        let row = sqlx::query_as::<_, TodoItemRow>(
            r#"
            INSERT INTO todo_items (todo, is_completed, created_at, updated_at)
            VALUES ($1, FALSE, $2, $2)
            RETURNING id, todo, is_completed, created_at, updated_at
            "#,
        )
        .bind(item.text().as_str())
        .bind(item.now())
        .fetch_one(&self.pool)
        .await?;

        TodoItem::try_from(row)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %item.id()))]
    async fn update(&self, item: &TodoItem) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE todo_items
            SET todo = $2, is_completed = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(item.id().as_i32())
        .bind(item.text().as_str())
        .bind(item.is_completed())
        .bind(item.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn delete_completed(&self) -> Result<u64, InfraError> {
        let result = sqlx::query("DELETE FROM todo_items WHERE is_completed")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
