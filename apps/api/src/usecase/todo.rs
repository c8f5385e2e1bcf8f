//! # ToDo ユースケース
//!
//! ToDo の作成・一覧・取得・更新・削除に関するビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - タイトルのバリデーションは作成と更新の両方で適用する
//! - 更新は部分更新を提供せず、title・body・status を常にまとめて置き換える
//! - 存在しない ID への操作はすべて NotFound に揃える

use std::sync::Arc;

use todo_domain::todo::{Todo, TodoContent, TodoId, TodoTitle};
use todo_infra::repository::TodoRepository;

use crate::error::ApiError;

/// ToDo 作成・更新の入力
///
/// 更新は全項目上書きのため、作成と同じ形を取る。
pub struct TodoInput {
    pub title:  String,
    pub body:   String,
    pub status: bool,
}

impl TodoInput {
    /// タイトルを検証し、永続化可能な [`TodoContent`] に変換する
    fn validate(self) -> Result<TodoContent, ApiError> {
        let title = TodoTitle::new(self.title)?;
        Ok(TodoContent {
            title,
            body:   self.body,
            status: self.status,
        })
    }
}

/// ToDo ユースケース実装
pub struct TodoUseCaseImpl {
    todo_repository: Arc<dyn TodoRepository>,
}

impl TodoUseCaseImpl {
    pub fn new(todo_repository: Arc<dyn TodoRepository>) -> Self {
        Self { todo_repository }
    }

    /// ToDo を作成する
    ///
    /// タイトルを検証し、ストアに永続化する。
    /// ID とタイムスタンプはストアが採番・設定したものを返す。
    pub async fn create_todo(&self, input: TodoInput) -> Result<Todo, ApiError> {
        let content = input.validate()?;
        let todo = self.todo_repository.create(&content).await?;

        tracing::info!(id = %todo.id(), "ToDo を作成しました");
        Ok(todo)
    }

    /// ToDo 一覧を取得する
    ///
    /// `status` を指定した場合は一致するもののみ、未指定の場合は全件返す。
    /// いずれも論理削除済みは含まない。
    pub async fn list_todos(&self, status: Option<bool>) -> Result<Vec<Todo>, ApiError> {
        let todos = match status {
            Some(status) => self.todo_repository.find_by_status(status).await?,
            None => self.todo_repository.find_all().await?,
        };
        Ok(todos)
    }

    /// ToDo を 1 件取得する
    pub async fn get_todo(&self, id: TodoId) -> Result<Todo, ApiError> {
        self.todo_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("ToDo が見つかりません".to_string()))
    }

    /// ToDo を更新する（全項目上書き）
    ///
    /// 存在確認を先に行い、存在しない ID は入力内容に関わらず NotFound。
    /// タイトルのバリデーションは作成時と同じ規則を適用する。
    pub async fn update_todo(&self, id: TodoId, input: TodoInput) -> Result<Todo, ApiError> {
        self.todo_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound("ToDo が見つかりません".to_string()))?;

        let content = input.validate()?;

        self.todo_repository
            .update(id, &content)
            .await?
            .ok_or_else(|| ApiError::NotFound("ToDo が見つかりません".to_string()))
    }

    /// ToDo を削除する（論理削除）
    ///
    /// 削除済み・存在しない ID に対する削除は NotFound。
    pub async fn delete_todo(&self, id: TodoId) -> Result<(), ApiError> {
        let deleted = self.todo_repository.delete(id).await?;
        if !deleted {
            return Err(ApiError::NotFound("ToDo が見つかりません".to_string()));
        }

        tracing::info!(id = %id, "ToDo を削除しました");
        Ok(())
    }
}
