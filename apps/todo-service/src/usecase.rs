//! # ユースケース層
//!
//! Todo Service のビジネスロジックを実装する。
//!
//! - **依存性注入**: リポジトリと時計を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは DTO 変換のみを担い、ロジックはユースケースに集約

pub mod todo_item;

pub use todo_item::{CreateTodoItemInput, TodoItemUseCaseImpl, UpdateTodoItemInput};
