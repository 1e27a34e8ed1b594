//! # HTTP ハンドラ
//!
//! - `health`: Liveness / Readiness Check
//! - `todo_item`: Todo アイテムの CRUD

pub mod health;
pub mod todo_item;

pub use health::{ReadinessState, health_check, readiness_check};
pub use todo_item::{
    TodoItemState,
    create_todo_item,
    delete_completed_todo_items,
    list_todo_items,
    update_todo_item,
};
