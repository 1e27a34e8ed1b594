//! # リポジトリ実装
//!
//! Todo アイテムの永続化を担当するリポジトリを提供する。
//!
//! ## 設計方針
//!
//! - **トレイトによる抽象化**: ユースケース層は `Arc<dyn TodoItemRepository>` に依存
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: インメモリの Fake 実装と差し替え可能

pub mod todo_item_repository;

pub use todo_item_repository::{PostgresTodoItemRepository, TodoItemRepository};
