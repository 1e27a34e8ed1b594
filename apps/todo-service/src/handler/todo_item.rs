//! # Todo アイテムハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /api/todolist` - 全アイテム一覧
//! - `POST /api/add/todoitem` - アイテム作成
//! - `PUT /api/update/todoitem/{id}` - アイテム更新（本文と完了フラグ）
//! - `DELETE /api/delete/completed` - 完了済みアイテムの一括削除

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use todolist_domain::todo_item::TodoItem;

use crate::{
    error::CoreError,
    extract::{TodoItemIdPath, ValidatedJson},
    usecase::{CreateTodoItemInput, TodoItemUseCaseImpl, UpdateTodoItemInput},
};

/// 一括削除成功時のメッセージ
pub const ALL_COMPLETED_DELETED_MESSAGE: &str = "All completed items have been deleted.";

/// Todo アイテム API の共有状態
pub struct TodoItemState {
    pub usecase: TodoItemUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// アイテム作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateTodoItemRequest {
    pub todo: String,
}

/// アイテム更新リクエスト
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoItemRequest {
    pub todo:         String,
    pub is_completed: bool,
}

/// Todo アイテム DTO
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemDto {
    pub id:           i32,
    pub todo:         String,
    pub is_completed: bool,
    pub created_at:   String,
    pub updated_at:   String,
}

impl From<&TodoItem> for TodoItemDto {
    fn from(item: &TodoItem) -> Self {
        Self {
            id:           item.id().as_i32(),
            todo:         item.text().as_str().to_string(),
            is_completed: item.is_completed(),
            created_at:   item.created_at().to_rfc3339(),
            updated_at:   item.updated_at().to_rfc3339(),
        }
    }
}

// --- ハンドラ ---

/// GET /api/todolist
///
/// 全アイテムを ID 順で返す。0 件の場合は空配列。
#[tracing::instrument(skip_all)]
pub async fn list_todo_items(
    State(state): State<Arc<TodoItemState>>,
) -> Result<impl IntoResponse, CoreError> {
    let items = state.usecase.list_items().await?;

    let dtos: Vec<TodoItemDto> = items.iter().map(TodoItemDto::from).collect();
    Ok(Json(dtos))
}

/// POST /api/add/todoitem
///
/// ## レスポンス
///
/// - `201 Created`: 作成されたアイテム（`Location: api/add/todoitem/{id}`）
/// - `400 Bad Request`: ボディ不正、本文が空または 100 文字超過
#[tracing::instrument(skip_all)]
pub async fn create_todo_item(
    State(state): State<Arc<TodoItemState>>,
    ValidatedJson(req): ValidatedJson<CreateTodoItemRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let item = state
        .usecase
        .create_item(CreateTodoItemInput { todo: req.todo })
        .await?;

    let location = format!("api/add/todoitem/{}", item.id());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(TodoItemDto::from(&item)),
    ))
}

/// PUT /api/update/todoitem/{id}
///
/// ## レスポンス
///
/// - `204 No Content`: 更新成功
/// - `400 Bad Request`: ボディ不正、本文不正、id が整数でない
/// - `404 Not Found`: `Item with id: {id} does not exist`
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_todo_item(
    State(state): State<Arc<TodoItemState>>,
    TodoItemIdPath(id): TodoItemIdPath,
    ValidatedJson(req): ValidatedJson<UpdateTodoItemRequest>,
) -> Result<impl IntoResponse, CoreError> {
    state
        .usecase
        .update_item(UpdateTodoItemInput {
            id,
            todo: req.todo,
            is_completed: req.is_completed,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/delete/completed
///
/// ## レスポンス
///
/// - `200 OK`: `All completed items have been deleted.`
/// - `404 Not Found`: `No completed items to delete.`
#[tracing::instrument(skip_all)]
pub async fn delete_completed_todo_items(
    State(state): State<Arc<TodoItemState>>,
) -> Result<impl IntoResponse, CoreError> {
    state.usecase.delete_completed_items().await?;

    Ok((StatusCode::OK, ALL_COMPLETED_DELETED_MESSAGE))
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request},
        routing::{delete, get, post, put},
    };
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use todolist_domain::{
        clock::FixedClock,
        todo_item::{TodoItemId, TodoText},
    };
    use todolist_infra::fake::FakeTodoItemRepository;
    use todolist_shared::ErrorResponse;
    use tower::ServiceExt;

    use super::*;

    // --- ヘルパー ---

    fn fixed_now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn create_test_app(repo: FakeTodoItemRepository) -> Router {
        let usecase = TodoItemUseCaseImpl::new(
            Arc::new(repo),
            Arc::new(FixedClock::new(fixed_now())),
        );
        let state = Arc::new(TodoItemState { usecase });

        Router::new()
            .route("/api/todolist", get(list_todo_items))
            .route("/api/add/todoitem", post(create_todo_item))
            .route("/api/update/todoitem/{id}", put(update_todo_item))
            .route("/api/delete/completed", delete(delete_completed_todo_items))
            .with_state(state)
    }

    fn seed_item(repo: &FakeTodoItemRepository, id: i32, todo: &str, is_completed: bool) {
        repo.add_item(TodoItem::from_db(
            TodoItemId::from_i32(id),
            TodoText::new(todo).unwrap(),
            is_completed,
            fixed_now(),
            fixed_now(),
        ));
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn response_bytes(response: axum::http::Response<Body>) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn response_json<T: serde::de::DeserializeOwned>(
        response: axum::http::Response<Body>,
    ) -> T {
        serde_json::from_slice(&response_bytes(response).await).unwrap()
    }

    async fn response_text(response: axum::http::Response<Body>) -> String {
        String::from_utf8(response_bytes(response).await).unwrap()
    }

    // --- GET /api/todolist ---

    #[tokio::test]
    async fn test_get_アイテムがない場合は空配列を返す() {
        // Given
        let sut = create_test_app(FakeTodoItemRepository::new());

        // When
        let response = sut
            .oneshot(empty_request(Method::GET, "/api/todolist"))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: Vec<TodoItemDto> = response_json(response).await;
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_get_アイテムをキャメルケースのjsonで返す() {
        // Given
        let repo = FakeTodoItemRepository::new();
        seed_item(&repo, 1, "Buy milk", true);
        let sut = create_test_app(repo);

        // When
        let response = sut
            .oneshot(empty_request(Method::GET, "/api/todolist"))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = response_json(response).await;
        assert_eq!(
            body,
            serde_json::json!([{
                "id": 1,
                "todo": "Buy milk",
                "isCompleted": true,
                "createdAt": "2023-11-14T22:13:20+00:00",
                "updatedAt": "2023-11-14T22:13:20+00:00"
            }])
        );
    }

    // --- POST /api/add/todoitem ---

    #[tokio::test]
    async fn test_post_アイテムを作成すると201とlocationヘッダーを返す() {
        // Given
        let repo = FakeTodoItemRepository::new();
        let sut = create_test_app(repo.clone());

        // When
        let response = sut
            .oneshot(json_request(
                Method::POST,
                "/api/add/todoitem",
                serde_json::json!({ "todo": "Buy milk" }),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::LOCATION],
            "api/add/todoitem/1"
        );
        let body: TodoItemDto = response_json(response).await;
        assert_eq!(body.id, 1);
        assert_eq!(body.todo, "Buy milk");
        assert!(!body.is_completed);
        assert_eq!(body.created_at, body.updated_at);
        assert_eq!(repo.items().len(), 1);
    }

    #[rstest]
    #[case::空文字列(serde_json::json!({ "todo": "" }), "Todo is required")]
    #[case::空白のみ(serde_json::json!({ "todo": "   " }), "Todo is required")]
    #[case::文字数超過(
        serde_json::json!({ "todo": "a".repeat(101) }),
        "Todo must be at most 100 characters"
    )]
    #[tokio::test]
    async fn test_post_不正な本文は400のvalidation_errorを返す(
        #[case] body: serde_json::Value,
        #[case] detail: &str,
    ) {
        // Given
        let repo = FakeTodoItemRepository::new();
        let sut = create_test_app(repo.clone());

        // When
        let response = sut
            .oneshot(json_request(Method::POST, "/api/add/todoitem", body))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response_json(response).await;
        assert_eq!(error, ErrorResponse::validation_error(detail));
        assert!(repo.items().is_empty());
    }

    #[tokio::test]
    async fn test_post_100文字ちょうどは受け入れる() {
        let sut = create_test_app(FakeTodoItemRepository::new());

        let response = sut
            .oneshot(json_request(
                Method::POST,
                "/api/add/todoitem",
                serde_json::json!({ "todo": "a".repeat(100) }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[rstest]
    #[case::フィールド欠落(r#"{}"#)]
    #[case::null(r#"{"todo": null}"#)]
    #[case::構文エラー(r#"{"todo": "#)]
    #[case::型不一致(r#"{"todo": 42}"#)]
    #[tokio::test]
    async fn test_post_不正なボディは400を返す(#[case] raw: &str) {
        let repo = FakeTodoItemRepository::new();
        let sut = create_test_app(repo.clone());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/add/todoitem")
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap();
        let response = sut.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response_json(response).await;
        assert_eq!(error.title, "Bad Request");
        assert!(repo.items().is_empty());
    }

    #[tokio::test]
    async fn test_post_content_typeがjsonでない場合は400を返す() {
        let sut = create_test_app(FakeTodoItemRepository::new());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/add/todoitem")
            .header("content-type", "text/plain")
            .body(Body::from(r#"{"todo": "Buy milk"}"#))
            .unwrap();
        let response = sut.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // --- PUT /api/update/todoitem/{id} ---

    #[tokio::test]
    async fn test_put_既存アイテムを更新すると204を返す() {
        // Given
        let repo = FakeTodoItemRepository::new();
        seed_item(&repo, 1, "Buy milk", false);
        let sut = create_test_app(repo.clone());

        // When
        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/api/update/todoitem/1",
                serde_json::json!({ "todo": "Buy oat milk", "isCompleted": true }),
            ))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response_bytes(response).await.is_empty());
        let stored = &repo.items()[0];
        assert_eq!(stored.text().as_str(), "Buy oat milk");
        assert!(stored.is_completed());
    }

    #[tokio::test]
    async fn test_put_存在しないidはプレーンテキストの404を返す() {
        let sut = create_test_app(FakeTodoItemRepository::new());

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/api/update/todoitem/99999",
                serde_json::json!({ "todo": "Buy milk", "isCompleted": true }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response_text(response).await,
            "Item with id: 99999 does not exist"
        );
    }

    #[tokio::test]
    async fn test_put_存在しないidは本文が空でも404を返す() {
        let sut = create_test_app(FakeTodoItemRepository::new());

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/api/update/todoitem/99999",
                serde_json::json!({ "todo": "", "isCompleted": true }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response_text(response).await,
            "Item with id: 99999 does not exist"
        );
    }

    #[tokio::test]
    async fn test_put_既存idで本文が空なら400を返す() {
        let repo = FakeTodoItemRepository::new();
        seed_item(&repo, 1, "Buy milk", false);
        let sut = create_test_app(repo.clone());

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/api/update/todoitem/1",
                serde_json::json!({ "todo": "", "isCompleted": true }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorResponse = response_json(response).await;
        assert_eq!(error, ErrorResponse::validation_error("Todo is required"));
        assert!(!repo.items()[0].is_completed());
    }

    #[tokio::test]
    async fn test_put_整数でないidは400を返す() {
        let sut = create_test_app(FakeTodoItemRepository::new());

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/api/update/todoitem/abc",
                serde_json::json!({ "todo": "Buy milk", "isCompleted": true }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_put_is_completed欠落は400を返す() {
        let repo = FakeTodoItemRepository::new();
        seed_item(&repo, 1, "Buy milk", false);
        let sut = create_test_app(repo.clone());

        let response = sut
            .oneshot(json_request(
                Method::PUT,
                "/api/update/todoitem/1",
                serde_json::json!({ "todo": "Buy oat milk" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(repo.items()[0].text().as_str(), "Buy milk");
    }

    // --- DELETE /api/delete/completed ---

    #[tokio::test]
    async fn test_delete_完了済みを削除すると200とメッセージを返す() {
        // Given
        let repo = FakeTodoItemRepository::new();
        seed_item(&repo, 1, "done", true);
        seed_item(&repo, 2, "open", false);
        let sut = create_test_app(repo.clone());

        // When
        let response = sut
            .oneshot(empty_request(Method::DELETE, "/api/delete/completed"))
            .await
            .unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_text(response).await, ALL_COMPLETED_DELETED_MESSAGE);
        let remaining: Vec<_> = repo.items().iter().map(TodoItem::id).collect();
        assert_eq!(remaining, vec![TodoItemId::from_i32(2)]);
    }

    #[tokio::test]
    async fn test_delete_完了済みがない場合は404を返す() {
        let repo = FakeTodoItemRepository::new();
        seed_item(&repo, 1, "open", false);
        let sut = create_test_app(repo);

        let response = sut
            .oneshot(empty_request(Method::DELETE, "/api/delete/completed"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response_text(response).await,
            "No completed items to delete."
        );
    }
}
