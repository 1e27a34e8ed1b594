//! # Todo Service エラー定義
//!
//! Todo Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | バリアント | ステータス | ボディ |
//! |-----------|-----------|--------|
//! | `MalformedRequest` | 400 | Problem Details (`bad-request`) |
//! | `BadRequest` | 400 | Problem Details (`validation-error`) |
//! | `NotFound` | 404 | メッセージのプレーンテキスト |
//! | `Database` | 500 | Problem Details（detail は固定） |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todolist_domain::DomainError;
use todolist_infra::InfraError;
use todolist_shared::ErrorResponse;

/// Todo Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// リクエストの形式が不正（JSON 構文、欠落フィールド、パスパラメータ）
    #[error("不正なリクエスト形式: {0}")]
    MalformedRequest(String),

    /// 入力値のバリデーション失敗
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// リソースが見つからない（メッセージはそのままクライアントに返す）
    #[error("{0}")]
    NotFound(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => CoreError::BadRequest(msg),
            not_found @ DomainError::NotFound { .. } => CoreError::NotFound(not_found.to_string()),
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let problem = match self {
            CoreError::NotFound(msg) => return (StatusCode::NOT_FOUND, msg).into_response(),
            CoreError::MalformedRequest(msg) => ErrorResponse::bad_request(msg),
            CoreError::BadRequest(msg) => ErrorResponse::validation_error(msg),
            CoreError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(problem)).into_response()
    }
}
