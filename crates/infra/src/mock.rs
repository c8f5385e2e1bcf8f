//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! todo-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use todo_domain::todo::{Todo, TodoContent, TodoId};

use crate::{error::InfraError, repository::TodoRepository};

// ===== MockTodoRepository =====

/// インメモリの ToDo リポジトリ
///
/// Postgres 実装と同じ観測可能な振る舞いを提供する:
/// ID の連番採番、削除済み行の除外、全項目上書き更新。
/// ID カウンターは削除と独立しているため、削除後も ID は再利用されない。
#[derive(Clone, Default)]
pub struct MockTodoRepository {
    todos:   Arc<Mutex<Vec<Todo>>>,
    next_id: Arc<Mutex<i64>>,
}

impl MockTodoRepository {
    pub fn new() -> Self {
        Self {
            todos:   Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(Mutex::new(0)),
        }
    }

    /// 保持している ToDo の件数を返す（検証用）
    pub fn len(&self) -> usize {
        self.todos.lock().unwrap().len()
    }

    /// ToDo を保持していない場合に true を返す（検証用）
    pub fn is_empty(&self) -> bool {
        self.todos.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl TodoRepository for MockTodoRepository {
    async fn create(&self, content: &TodoContent) -> Result<Todo, InfraError> {
        let id = {
            let mut next_id = self.next_id.lock().unwrap();
            *next_id += 1;
            TodoId::new(*next_id).expect("採番した ID は 1 以上")
        };

        let now = Utc::now();
        let todo = Todo::from_db(
            id,
            content.title.clone(),
            content.body.clone(),
            content.status,
            now,
            now,
        );

        self.todos.lock().unwrap().push(todo.clone());
        Ok(todo)
    }

    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        Ok(self.todos.lock().unwrap().clone())
    }

    async fn find_by_status(&self, status: bool) -> Result<Vec<Todo>, InfraError> {
        Ok(self
            .todos
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.status() == status)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
        Ok(self
            .todos
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id() == id)
            .cloned())
    }

    async fn update(&self, id: TodoId, content: &TodoContent) -> Result<Option<Todo>, InfraError> {
        let mut todos = self.todos.lock().unwrap();

        let Some(todo) = todos.iter_mut().find(|t| t.id() == id) else {
            return Ok(None);
        };

        let updated = Todo::from_db(
            todo.id(),
            content.title.clone(),
            content.body.clone(),
            content.status,
            todo.created_at(),
            Utc::now(),
        );
        *todo = updated.clone();

        Ok(Some(updated))
    }

    async fn delete(&self, id: TodoId) -> Result<bool, InfraError> {
        let mut todos = self.todos.lock().unwrap();
        let before = todos.len();
        todos.retain(|t| t.id() != id);
        Ok(todos.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use todo_domain::todo::TodoTitle;

    use super::*;

    fn content(title: &str, body: &str, status: bool) -> TodoContent {
        TodoContent {
            title: TodoTitle::new(title).unwrap(),
            body: body.to_string(),
            status,
        }
    }

    #[tokio::test]
    async fn test_作成ごとにidが連番で採番される() {
        let repo = MockTodoRepository::new();

        let first = repo.create(&content("牛乳を買う", "", false)).await.unwrap();
        let second = repo.create(&content("掃除をする", "", false)).await.unwrap();

        assert_eq!(first.id().as_i64(), 1);
        assert_eq!(second.id().as_i64(), 2);
    }

    #[tokio::test]
    async fn test_削除したidは再利用されない() {
        let repo = MockTodoRepository::new();

        let first = repo.create(&content("牛乳を買う", "", false)).await.unwrap();
        repo.delete(first.id()).await.unwrap();

        let second = repo.create(&content("掃除をする", "", false)).await.unwrap();
        assert_eq!(second.id().as_i64(), 2);
    }

    #[tokio::test]
    async fn test_削除済みは検索から除外される() {
        let repo = MockTodoRepository::new();

        let todo = repo.create(&content("牛乳を買う", "", false)).await.unwrap();
        assert!(repo.delete(todo.id()).await.unwrap());

        assert_eq!(repo.find_by_id(todo.id()).await.unwrap(), None);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_2回目の削除はfalseを返す() {
        let repo = MockTodoRepository::new();

        let todo = repo.create(&content("牛乳を買う", "", false)).await.unwrap();
        assert!(repo.delete(todo.id()).await.unwrap());
        assert!(!repo.delete(todo.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_更新は全項目を上書きする() {
        let repo = MockTodoRepository::new();

        let todo = repo
            .create(&content("牛乳を買う", "低脂肪", false))
            .await
            .unwrap();
        let updated = repo
            .update(todo.id(), &content("豆乳を買う", "無調整", true))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title().as_str(), "豆乳を買う");
        assert_eq!(updated.body(), "無調整");
        assert!(updated.status());
        assert_eq!(updated.created_at(), todo.created_at());

        let found = repo.find_by_id(todo.id()).await.unwrap().unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn test_存在しないidの更新はnoneを返す() {
        let repo = MockTodoRepository::new();

        let result = repo
            .update(TodoId::new(999).unwrap(), &content("豆乳を買う", "", true))
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_ステータスで絞り込める() {
        let repo = MockTodoRepository::new();

        repo.create(&content("牛乳を買う", "", false)).await.unwrap();
        repo.create(&content("掃除をする", "", true)).await.unwrap();
        repo.create(&content("洗濯をする", "", false)).await.unwrap();

        let open = repo.find_by_status(false).await.unwrap();
        let done = repo.find_by_status(true).await.unwrap();

        assert_eq!(open.len(), 2);
        assert_eq!(done.len(), 1);
        assert_eq!(repo.find_all().await.unwrap().len(), open.len() + done.len());
    }
}
