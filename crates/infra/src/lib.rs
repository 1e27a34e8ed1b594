//! # TodoList インフラ層
//!
//! PostgreSQL との接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: Todo アイテムの永続化
//!
//! ## 依存関係
//!
//! ```text
//! todo-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - `fake` - テスト用インメモリリポジトリ（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use todolist_infra::{db, repository::PostgresTodoItemRepository};
//!
//! async fn setup() -> Result<(), todolist_infra::InfraError> {
//!     let pool = db::create_pool("postgres://localhost/todolist").await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let repository = PostgresTodoItemRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod fake;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
