//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用する日時定数・エンティティ生成ヘルパー。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use todolist_domain::todo_item::{NewTodoItem, TodoItem, TodoText};
use todolist_infra::repository::{PostgresTodoItemRepository, TodoItemRepository};

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// テスト用の固定日時から `seconds` 秒後
pub fn test_later(seconds: i64) -> DateTime<Utc> {
    test_now() + Duration::seconds(seconds)
}

/// 固定日時で NewTodoItem を作成
pub fn new_todo_item(text: &str) -> NewTodoItem {
    NewTodoItem::new(TodoText::new(text).unwrap(), test_now())
}

/// アイテムを挿入し、完了状態にして返す
pub async fn insert_completed(sut: &PostgresTodoItemRepository, text: &str) -> TodoItem {
    let item = sut.insert(&new_todo_item(text)).await.unwrap();
    let completed = item.update(item.text().clone(), true, test_later(1));
    assert!(sut.update(&completed).await.unwrap());
    completed
}
