//! # ルーター構築
//!
//! ルーティングとミドルウェアスタックを組み立てる。
//! `main` と統合テストが同じ構成を使うため、ここに集約する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use todolist_shared::{
    access_log::AccessLogLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    ReadinessState,
    TodoItemState,
    create_todo_item,
    delete_completed_todo_items,
    health_check,
    list_todo_items,
    readiness_check,
    update_todo_item,
};

/// アプリケーションのルーターを構築する
pub fn build_app(
    todo_item_state: Arc<TodoItemState>,
    readiness_state: Arc<ReadinessState>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/api/todolist", get(list_todo_items))
        .route("/api/add/todoitem", post(create_todo_item))
        .route("/api/update/todoitem/{id}", put(update_todo_item))
        .route("/api/delete/completed", delete(delete_completed_todo_items))
        .with_state(todo_item_state)
        // レイヤー順序: 下に書いたものが外側
        // 1. CorsLayer（最外）: プリフライトに応答し、全レスポンスに CORS ヘッダーを付与
        // 2. SetRequestIdLayer: UUID v7 を生成（クライアント提供値があればそれを使用）
        // 3. TraceLayer: request_id を含むリクエストスパンを作成
        // 4. AccessLogLayer: スパン内で 1 行のアクセスログを出力
        // 5. PropagateRequestIdLayer: レスポンスヘッダーに x-request-id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(AccessLogLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
}
