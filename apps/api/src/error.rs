//! # Todo API エラー定義
//!
//! API で発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## ステータスコードとの対応
//!
//! | バリアント | ステータス | ボディ |
//! |-----------|-----------|--------|
//! | `Validation` | 400 Bad Request | エラー内容 |
//! | `NotFound` | 404 Not Found | エラー内容 |
//! | `Database` | 500 Internal Server Error | 固定メッセージ |
//!
//! バリデーションエラー（400）とストア障害（500）は常に区別する。
//! 500 の詳細はログにのみ出力し、レスポンスには含めない。

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_domain::DomainError;
use todo_infra::InfraError;
use todo_shared::ErrorResponse;

/// Todo API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエスト内容が不正
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 対象の ToDo が存在しない（論理削除済みを含む）
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let DomainError::Validation(msg) = e;
        ApiError::Validation(msg)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(format!("リクエストボディが不正です: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(format!("クエリパラメータが不正です: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Database(e) => {
                tracing::error!("データベースエラー: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "内部エラーが発生しました".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
