//! # TodoRepository
//!
//! ToDo の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **論理削除**: 参照・更新系クエリはすべて `deleted_at IS NULL` を条件に含める
//! - **ストア採番**: ID とタイムスタンプは `INSERT ... RETURNING` で取得
//! - **値オブジェクトの再検証**: 行からエンティティへの復元時に検証し、
//!   不正な行は `InfraError::Unexpected` として扱う

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use todo_domain::todo::{Todo, TodoContent, TodoId, TodoTitle};

use crate::error::InfraError;

/// ToDo リポジトリトレイト
///
/// ToDo の永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// ToDo を新規作成する
    ///
    /// ID とタイムスタンプはストアが採番・設定する。
    ///
    /// # 戻り値
    ///
    /// - `Ok(todo)`: 採番済み ID とタイムスタンプを含むエンティティ
    /// - `Err(_)`: データベースエラー
    async fn create(&self, content: &TodoContent) -> Result<Todo, InfraError>;

    /// 未削除の ToDo をすべて取得する
    ///
    /// 並び順は ID 昇順。空の場合は空の Vec を返す。
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError>;

    /// ステータスが一致する未削除の ToDo をすべて取得する
    ///
    /// 並び順は ID 昇順。
    async fn find_by_status(&self, status: bool) -> Result<Vec<Todo>, InfraError>;

    /// ID で ToDo を検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(todo))`: 未削除の ToDo が見つかった場合
    /// - `Ok(None)`: 存在しない、または論理削除済みの場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError>;

    /// ToDo の可変項目を全項目上書きする
    ///
    /// タイトル・本文・ステータスを無条件に置き換え、`updated_at` を
    /// ストア側で更新する。部分更新は提供しない。
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(todo))`: 更新後のエンティティ
    /// - `Ok(None)`: 存在しない、または論理削除済みの場合
    /// - `Err(_)`: データベースエラー
    async fn update(&self, id: TodoId, content: &TodoContent) -> Result<Option<Todo>, InfraError>;

    /// ToDo を論理削除する
    ///
    /// `deleted_at` を設定する。行は物理的には残るが、
    /// 以降のすべての検索・更新から除外される。
    ///
    /// # 戻り値
    ///
    /// - `Ok(true)`: 削除した場合
    /// - `Ok(false)`: 対象行がない場合（存在しない、または削除済み）
    /// - `Err(_)`: データベースエラー
    async fn delete(&self, id: TodoId) -> Result<bool, InfraError>;
}

/// PostgreSQL 実装の TodoRepository
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 取得行をエンティティへ復元する
///
/// 値オブジェクトの再検証に失敗した場合（マイグレーション前の行や
/// 手動変更された行など）は `InfraError::Unexpected` を返す。
fn map_row(row: &PgRow) -> Result<Todo, InfraError> {
    let id =
        TodoId::new(row.try_get("id")?).map_err(|e| InfraError::Unexpected(e.to_string()))?;
    let title = TodoTitle::new(row.try_get::<String, _>("title")?)
        .map_err(|e| InfraError::Unexpected(e.to_string()))?;

    Ok(Todo::from_db(
        id,
        title,
        row.try_get("body")?,
        row.try_get("status")?,
        row.try_get("created_at")?,
        row.try_get("updated_at")?,
    ))
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn create(&self, content: &TodoContent) -> Result<Todo, InfraError> {
        let row = sqlx::query(
            r#"
            INSERT INTO todos (title, body, status)
            VALUES ($1, $2, $3)
            RETURNING
                id,
                title,
                body,
                status,
                created_at,
                updated_at
            "#,
        )
        .bind(content.title.as_str())
        .bind(&content.body)
        .bind(content.status)
        .fetch_one(&self.pool)
        .await?;

        map_row(&row)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Todo>, InfraError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                title,
                body,
                status,
                created_at,
                updated_at
            FROM todos
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%status))]
    async fn find_by_status(&self, status: bool) -> Result<Vec<Todo>, InfraError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                title,
                body,
                status,
                created_at,
                updated_at
            FROM todos
            WHERE deleted_at IS NULL AND status = $1
            ORDER BY id
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, InfraError> {
        let row = sqlx::query(
            r#"
            SELECT
                id,
                title,
                body,
                status,
                created_at,
                updated_at
            FROM todos
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        map_row(&row).map(Some)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update(&self, id: TodoId, content: &TodoContent) -> Result<Option<Todo>, InfraError> {
        let row = sqlx::query(
            r#"
            UPDATE todos
            SET title = $1, body = $2, status = $3, updated_at = NOW()
            WHERE id = $4 AND deleted_at IS NULL
            RETURNING
                id,
                title,
                body,
                status,
                created_at,
                updated_at
            "#,
        )
        .bind(content.title.as_str())
        .bind(&content.body)
        .bind(content.status)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        map_row(&row).map(Some)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: TodoId) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE todos
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.as_i64())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresTodoRepository>();
    }
}
