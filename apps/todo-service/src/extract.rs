//! # カスタムエクストラクタ
//!
//! axum 標準のエクストラクタは JSON の欠落フィールドに 422、
//! Content-Type 不一致に 415 を返す。このサービスではリクエスト形式の
//! 誤りをすべて 400 Problem Details として返すため、リジェクションを
//! [`CoreError::MalformedRequest`] に変換するラッパーを用意する。

use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use todolist_domain::todo_item::TodoItemId;

use crate::error::CoreError;

/// JSON ボディを取り出し、失敗時は 400 を返すエクストラクタ
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| CoreError::MalformedRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// パスパラメータ `{id}` を [`TodoItemId`] として取り出すエクストラクタ
///
/// 整数として解釈できない場合は 400 を返す。
pub struct TodoItemIdPath(pub TodoItemId);

impl<S> FromRequestParts<S> for TodoItemIdPath
where
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id): Path<i32> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| CoreError::MalformedRequest(rejection.body_text()))?;
        Ok(Self(TodoItemId::from_i32(id)))
    }
}
