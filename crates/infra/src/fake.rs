//! # テスト用 Fake リポジトリ
//!
//! ハンドラ・ユースケースのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todolist-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! PostgreSQL 実装と同じく、ID は 1 から順に採番し、
//! `find_all` は ID 昇順で返す。

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use todolist_domain::todo_item::{NewTodoItem, TodoItem, TodoItemId};

use crate::{error::InfraError, repository::TodoItemRepository};

#[derive(Default)]
struct FakeStore {
    items:   Vec<TodoItem>,
    next_id: i32,
}

/// インメモリの TodoItemRepository
///
/// `Clone` したインスタンスは同じストアを共有する。
#[derive(Clone, Default)]
pub struct FakeTodoItemRepository {
    store: Arc<Mutex<FakeStore>>,
}

impl FakeTodoItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 永続化済みのアイテムを直接追加する
    ///
    /// 以降の採番は追加したアイテムの ID より後から始まる。
    pub fn add_item(&self, item: TodoItem) {
        let mut store = self.store.lock().unwrap();
        store.next_id = store.next_id.max(item.id().as_i32());
        store.items.push(item);
        store.items.sort_by_key(TodoItem::id);
    }

    /// 現在のアイテムを ID 昇順で取得する
    pub fn items(&self) -> Vec<TodoItem> {
        self.store.lock().unwrap().items.clone()
    }
}

#[async_trait]
impl TodoItemRepository for FakeTodoItemRepository {
    async fn find_all(&self) -> Result<Vec<TodoItem>, InfraError> {
        Ok(self.items())
    }

    async fn find_by_id(&self, id: TodoItemId) -> Result<Option<TodoItem>, InfraError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned())
    }

    async fn insert(&self, item: &NewTodoItem) -> Result<TodoItem, InfraError> {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;

        let created = TodoItem::from_db(
            TodoItemId::from_i32(store.next_id),
            item.text().clone(),
            false,
            item.now(),
            item.now(),
        );
        store.items.push(created.clone());

        Ok(created)
    }

    async fn update(&self, item: &TodoItem) -> Result<bool, InfraError> {
        let mut store = self.store.lock().unwrap();
        match store.items.iter_mut().find(|stored| stored.id() == item.id()) {
            Some(stored) => {
                *stored = item.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_completed(&self) -> Result<u64, InfraError> {
        let mut store = self.store.lock().unwrap();
        let before = store.items.len();
        store.items.retain(|item| !item.is_completed());

        Ok((before - store.items.len()) as u64)
    }
}
