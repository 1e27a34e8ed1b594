//! # TodoList ドメイン層
//!
//! Todo アイテムのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`todo_item::TodoItem`]）
//! - **値オブジェクト**: 生成時に検証される不変オブジェクト（[`todo_item::TodoText`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! todo-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use todolist_domain::{DomainError, todo_item::TodoText};
//!
//! let text = TodoText::new("Buy milk").unwrap();
//! assert_eq!(text.as_str(), "Buy milk");
//!
//! let error = TodoText::new("").unwrap_err();
//! assert!(matches!(error, DomainError::Validation(_)));
//! ```

pub mod clock;
pub mod error;
pub mod todo_item;

pub use error::DomainError;
