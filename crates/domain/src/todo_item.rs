//! # Todo アイテム
//!
//! Todo リストを構成する唯一のエンティティとその値オブジェクト。
//!
//! ## 使用例
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use todolist_domain::todo_item::{NewTodoItem, TodoItem, TodoItemId, TodoText};
//!
//! let now = Utc::now();
//! let new_item = NewTodoItem::new(TodoText::new("Buy milk").unwrap(), now);
//! assert_eq!(new_item.text().as_str(), "Buy milk");
//!
//! // 永続化後の状態を復元し、更新する
//! let item = TodoItem::from_db(
//!     TodoItemId::from_i32(1),
//!     new_item.text().clone(),
//!     false,
//!     now,
//!     now,
//! );
//! let updated = item.update(TodoText::new("Buy oat milk").unwrap(), true, now + Duration::seconds(1));
//!
//! assert!(updated.is_completed());
//! assert!(updated.updated_at() > updated.created_at());
//! ```

use chrono::{DateTime, Utc};
use derive_more::Display;

use crate::DomainError;

// =========================================================================
// TodoItemId（Todo アイテム ID）
// =========================================================================

/// Todo アイテムの一意識別子
///
/// ストア側で採番される整数 ID。作成後は変更されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{_0}")]
pub struct TodoItemId(i32);

impl TodoItemId {
    /// 既存の整数値から ID を作成する
    pub fn from_i32(value: i32) -> Self {
        Self(value)
    }

    /// 内部の整数値を取得する
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

// =========================================================================
// TodoText（Todo 本文）
// =========================================================================

/// Todo 本文の最大文字数（DB: `VARCHAR(100)`）
pub const MAX_TODO_TEXT_LENGTH: usize = 100;

/// Todo 本文（値オブジェクト）
///
/// # 不変条件
///
/// - 空文字列・空白のみではない
/// - 最大 100 文字（`chars().count()` でカウント）
///
/// 入力はトリミングせずにそのまま保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoText(String);

impl TodoText {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation("Todo is required".to_string()));
        }

        if value.chars().count() > MAX_TODO_TEXT_LENGTH {
            return Err(DomainError::Validation(format!(
                "Todo must be at most {MAX_TODO_TEXT_LENGTH} characters"
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TodoText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// NewTodoItem（未永続化の Todo アイテム）
// =========================================================================

/// まだ ID が採番されていない Todo アイテム
///
/// リポジトリの `insert` に渡す。`created_at` と `updated_at` は
/// 同じ時刻 `now` で初期化され、完了フラグは常に `false` から始まる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodoItem {
    text: TodoText,
    now:  DateTime<Utc>,
}

impl NewTodoItem {
    pub fn new(text: TodoText, now: DateTime<Utc>) -> Self {
        Self { text, now }
    }

    pub fn text(&self) -> &TodoText {
        &self.text
    }

    /// 作成日時（= 初回の更新日時）
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

// =========================================================================
// TodoItem（Todo アイテムエンティティ）
// =========================================================================

/// Todo アイテムエンティティ
///
/// # 不変条件
///
/// - `updated_at >= created_at`
/// - 更新で `updated_at` が過去に戻ることはない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    id:           TodoItemId,
    text:         TodoText,
    is_completed: bool,
    created_at:   DateTime<Utc>,
    updated_at:   DateTime<Utc>,
}

impl TodoItem {
    /// データベースから Todo アイテムを復元する
    pub fn from_db(
        id: TodoItemId,
        text: TodoText,
        is_completed: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text,
            is_completed,
            created_at,
            updated_at,
        }
    }

    /// 本文と完了フラグを置き換えた新インスタンスを返す
    ///
    /// 部分更新はない。`updated_at` は `now` と直前の `updated_at` の
    /// 遅い方になる（時計が巻き戻っても単調性を保つ）。
    pub fn update(&self, text: TodoText, is_completed: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            text,
            is_completed,
            created_at: self.created_at,
            updated_at: now.max(self.updated_at),
        }
    }

    // Getter メソッド

    pub fn id(&self) -> TodoItemId {
        self.id
    }

    pub fn text(&self) -> &TodoText {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
