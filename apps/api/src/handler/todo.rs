//! # ToDo ハンドラ
//!
//! ToDo リソースの CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `POST /todo` - ToDo 作成
//! - `GET /todo` - ToDo 一覧（`?status=` で絞り込み）
//! - `GET /todo/{id}` - ToDo 取得
//! - `PUT /todo/{id}` - ToDo 更新（全項目上書き）
//! - `DELETE /todo/{id}` - ToDo 削除（論理削除）
//!
//! ## レスポンス形式
//!
//! 成功時は `{"todo": {...}}` / `{"todos": [...]}`、
//! 失敗時は `{"error": "メッセージ"}` を返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path,
        Query,
        State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use todo_domain::todo::{Todo, TodoId};

use crate::{
    error::ApiError,
    usecase::{TodoInput, TodoUseCaseImpl},
};

/// ToDo API の共有状態
pub struct TodoState {
    pub usecase: TodoUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// ToDo 一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct ListTodosQuery {
    pub status: Option<String>,
}

impl ListTodosQuery {
    /// `status` パラメータを解釈する
    ///
    /// 未指定および空文字列は「絞り込みなし」。
    /// `"true"` / `"false"` 以外の値はバリデーションエラー。
    fn parse_status(&self) -> Result<Option<bool>, ApiError> {
        match self.status.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<bool>()
                .map(Some)
                .map_err(|_| ApiError::Validation(format!("status の形式が不正です: {raw}"))),
        }
    }
}

/// ToDo 作成・更新リクエスト
///
/// PUT は全項目上書きのため、作成と同じ形を取る。
/// `body` と `status` は省略時にそれぞれ空文字列・false になる。
#[derive(Debug, Deserialize)]
pub struct TodoRequest {
    pub title:  String,
    #[serde(default)]
    pub body:   String,
    #[serde(default)]
    pub status: bool,
}

impl TodoRequest {
    fn into_input(self) -> TodoInput {
        TodoInput {
            title:  self.title,
            body:   self.body,
            status: self.status,
        }
    }
}

/// ToDo DTO
///
/// `deleted_at` は公開しない。削除済みの ToDo はそもそも取得できないため、
/// レスポンスに現れる値は常に null になる。
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TodoDto {
    pub id:         i64,
    pub title:      String,
    pub body:       String,
    pub status:     bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Todo> for TodoDto {
    fn from(todo: &Todo) -> Self {
        Self {
            id:         todo.id().as_i64(),
            title:      todo.title().as_str().to_string(),
            body:       todo.body().to_string(),
            status:     todo.status(),
            created_at: todo.created_at().to_rfc3339(),
            updated_at: todo.updated_at().to_rfc3339(),
        }
    }
}

/// ToDo 1 件のレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    pub todo: TodoDto,
}

/// ToDo 一覧のレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoListResponse {
    pub todos: Vec<TodoDto>,
}

/// パスパラメータの ID を解釈する
///
/// 数値でない・0 以下の ID に一致する ToDo は存在しないため、
/// パース失敗は NotFound として扱う。
fn parse_todo_id(raw: &str) -> Result<TodoId, ApiError> {
    raw.parse::<TodoId>()
        .map_err(|_| ApiError::NotFound("ToDo が見つかりません".to_string()))
}

// --- ハンドラ ---

/// POST /todo
///
/// ToDo を作成する。
///
/// ## レスポンス
///
/// - `201 Created`: 作成された ToDo
/// - `400 Bad Request`: ボディ不正、タイトルが 3 文字未満
/// - `500 Internal Server Error`: ストア障害
#[tracing::instrument(skip_all)]
pub async fn create_todo(
    State(state): State<Arc<TodoState>>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let todo = state.usecase.create_todo(req.into_input()).await?;

    let response = TodoResponse {
        todo: TodoDto::from(&todo),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /todo
///
/// ToDo 一覧を取得する。`?status=true|false` で絞り込める。
///
/// ## レスポンス
///
/// - `200 OK`: ToDo の一覧（0 件でも 200 と空配列）
/// - `400 Bad Request`: `status` が `"true"` / `"false"` 以外、
///   またはクエリ文字列を解釈できない
/// - `500 Internal Server Error`: ストア障害
#[tracing::instrument(skip_all)]
pub async fn list_todos(
    State(state): State<Arc<TodoState>>,
    query: Result<Query<ListTodosQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query?;
    let status = query.parse_status()?;

    let todos = state.usecase.list_todos(status).await?;
    let items: Vec<TodoDto> = todos.iter().map(TodoDto::from).collect();

    Ok((StatusCode::OK, Json(TodoListResponse { todos: items })))
}

/// GET /todo/{id}
///
/// ToDo を 1 件取得する。
///
/// ## レスポンス
///
/// - `200 OK`: ToDo
/// - `404 Not Found`: 存在しない、または削除済み
#[tracing::instrument(skip_all, fields(%id))]
pub async fn get_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let todo_id = parse_todo_id(&id)?;

    let todo = state.usecase.get_todo(todo_id).await?;

    let response = TodoResponse {
        todo: TodoDto::from(&todo),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// PUT /todo/{id}
///
/// ToDo を更新する。title・body・status の全項目を上書きする。
///
/// ## レスポンス
///
/// - `200 OK`: 更新後の ToDo
/// - `400 Bad Request`: ボディ不正、タイトルが 3 文字未満
/// - `404 Not Found`: 存在しない、または削除済み
/// - `500 Internal Server Error`: ストア障害
///
/// 存在確認はボディの解釈より先に行う。存在しない ID への更新は
/// ボディが不正でも 404 を返す。
#[tracing::instrument(skip_all, fields(%id))]
pub async fn update_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
    payload: Result<Json<TodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let todo_id = parse_todo_id(&id)?;

    // 存在しない ID はボディの形式に関わらず 404
    state.usecase.get_todo(todo_id).await?;

    let Json(req) = payload?;

    let todo = state.usecase.update_todo(todo_id, req.into_input()).await?;

    let response = TodoResponse {
        todo: TodoDto::from(&todo),
    };
    Ok((StatusCode::OK, Json(response)))
}

/// DELETE /todo/{id}
///
/// ToDo を論理削除する。
///
/// ## レスポンス
///
/// - `204 No Content`: 削除成功（ボディなし）
/// - `404 Not Found`: 存在しない、または削除済み
#[tracing::instrument(skip_all, fields(%id))]
pub async fn delete_todo(
    State(state): State<Arc<TodoState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let todo_id = parse_todo_id(&id)?;

    state.usecase.delete_todo(todo_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
