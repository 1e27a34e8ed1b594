//! Todo アイテム管理ユースケース

use std::sync::Arc;

use todolist_domain::{
    DomainError,
    clock::Clock,
    todo_item::{NewTodoItem, TodoItem, TodoItemId, TodoText},
};
use todolist_infra::repository::TodoItemRepository;

use crate::error::CoreError;

/// 完了済みアイテムが 1 件もない場合のメッセージ
pub const NO_COMPLETED_ITEMS_MESSAGE: &str = "No completed items to delete.";

/// アイテム作成の入力
pub struct CreateTodoItemInput {
    pub todo: String,
}

/// アイテム更新の入力
///
/// 部分更新はなく、本文と完了フラグを常に両方置き換える。
pub struct UpdateTodoItemInput {
    pub id:           TodoItemId,
    pub todo:         String,
    pub is_completed: bool,
}

/// Todo アイテム管理ユースケース
pub struct TodoItemUseCaseImpl {
    todo_item_repository: Arc<dyn TodoItemRepository>,
    clock:                Arc<dyn Clock>,
}

impl TodoItemUseCaseImpl {
    pub fn new(todo_item_repository: Arc<dyn TodoItemRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            todo_item_repository,
            clock,
        }
    }

    /// 全アイテムを ID 順で取得する
    pub async fn list_items(&self) -> Result<Vec<TodoItem>, CoreError> {
        let items = self.todo_item_repository.find_all().await?;
        Ok(items)
    }

    /// アイテムを作成する
    ///
    /// 本文のバリデーションに失敗した場合は何も保存しない。
    pub async fn create_item(&self, input: CreateTodoItemInput) -> Result<TodoItem, CoreError> {
        let text = TodoText::new(input.todo)?;
        let new_item = NewTodoItem::new(text, self.clock.now());

        let item = self.todo_item_repository.insert(&new_item).await?;
        tracing::info!(todo_item_id = %item.id(), "Todo アイテムを作成しました");

        Ok(item)
    }

    /// アイテムの本文と完了フラグを更新する
    ///
    /// 1. 既存アイテムの取得（なければ本文に関係なく 404）
    /// 2. 本文バリデーション
    /// 3. 更新日時を進めて保存（読み取り後に削除されていた場合も 404）
    pub async fn update_item(&self, input: UpdateTodoItemInput) -> Result<TodoItem, CoreError> {
        let item = self
            .todo_item_repository
            .find_by_id(input.id)
            .await?
            .ok_or_else(|| item_not_found(input.id))?;

        let text = TodoText::new(input.todo)?;

        let updated = item.update(text, input.is_completed, self.clock.now());

        if !self.todo_item_repository.update(&updated).await? {
            return Err(item_not_found(input.id));
        }

        Ok(updated)
    }

    /// 完了済みアイテムをすべて削除し、削除件数を返す
    ///
    /// 1 件も削除されなかった場合は 404 とする。
    pub async fn delete_completed_items(&self) -> Result<u64, CoreError> {
        let deleted = self.todo_item_repository.delete_completed().await?;

        if deleted == 0 {
            return Err(CoreError::NotFound(NO_COMPLETED_ITEMS_MESSAGE.to_string()));
        }

        tracing::info!(deleted, "完了済み Todo アイテムを削除しました");
        Ok(deleted)
    }
}

fn item_not_found(id: TodoItemId) -> CoreError {
    DomainError::NotFound {
        entity_type: "Item",
        id:          id.to_string(),
    }
    .into()
}
