//! # TodoList 共有ユーティリティ
//!
//! ドメインに依存しない横断的なユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum には依存しない（`IntoResponse` 変換はサービス側の責務）
//! - トレーシング関連は `observability` feature の背後に置く

#[cfg(feature = "observability")]
pub mod access_log;
pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
