//! # ToDo エンティティ
//!
//! ToDo 管理の中核となるエンティティと値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: プリミティブ型をラップし、型安全性を確保
//! - **バリデーション**: 生成時に検証し、不正な値の存在を型レベルで排除
//! - **全項目上書き**: 更新は [`TodoContent`] による全項目の置き換えのみ。
//!   部分更新は提供しない
//!
//! ## 含まれる型
//!
//! | 型 | 内容 | 用途 |
//! |---|------|------|
//! | [`TodoId`] | `i64` | ストアが採番するサロゲートキー |
//! | [`TodoTitle`] | `String` | タイトル（最小 3 文字） |
//! | [`TodoContent`] | struct | 作成・更新で受け渡す可変項目一式 |
//! | [`Todo`] | entity | 永続化された ToDo |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::DomainError;

// =========================================================================
// TodoId（ToDo ID）
// =========================================================================

/// ToDo ID（値オブジェクト）
///
/// ストアが採番するサロゲートキー。作成後は不変で、
/// 論理削除後も再利用されない。
///
/// # 不変条件
///
/// - 1 以上の正整数
///
/// # 使用例
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use todo_domain::todo::TodoId;
///
/// let id = TodoId::new(42)?;
/// assert_eq!(id.as_i64(), 42);
/// assert_eq!(id.to_string(), "42");
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("{_0}")]
pub struct TodoId(i64);

impl TodoId {
    /// 指定した値から ToDo ID を作成する
    ///
    /// # バリデーション
    ///
    /// - 0 以下は無効（ID は 1 以上）
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::Validation(
                "ToDo ID は 1 以上の整数である必要があります".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// 内部の i64 値を取得する
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for TodoId {
    type Error = DomainError;

    /// i64 から TodoId への変換を試みる
    ///
    /// # エラー
    ///
    /// - 値が 0 以下の場合は `DomainError::Validation` を返す
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::str::FromStr for TodoId {
    type Err = DomainError;

    /// パスパラメータなどの文字列表現から ToDo ID を作成する
    ///
    /// # エラー
    ///
    /// 整数として解釈できない、または 0 以下の場合は
    /// `DomainError::Validation` を返す。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s.parse().map_err(|_| {
            DomainError::Validation("ToDo ID は 1 以上の整数である必要があります".to_string())
        })?;
        Self::new(value)
    }
}

// =========================================================================
// TodoTitle（タイトル）
// =========================================================================

/// ToDo タイトル（値オブジェクト）
///
/// # バリデーション
///
/// - 最小 [`TodoTitle::MIN_LENGTH`] 文字（`chars().count()` でカウント）
/// - 最大長の制限なし
/// - 前後の空白はトリムしない（長さの判定は入力そのままに対して行う）
///
/// # 使用例
///
/// ```rust
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use todo_domain::todo::TodoTitle;
///
/// let title = TodoTitle::new("牛乳を買う")?;
/// assert_eq!(title.as_str(), "牛乳を買う");
///
/// assert!(TodoTitle::new("あい").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// タイトルの最小文字数
    pub const MIN_LENGTH: usize = 3;

    /// 指定した値からタイトルを作成する
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.chars().count() < Self::MIN_LENGTH {
            return Err(DomainError::Validation(format!(
                "タイトルは {} 文字以上である必要があります",
                Self::MIN_LENGTH
            )));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =========================================================================
// TodoContent（可変項目一式）
// =========================================================================

/// 作成・更新で受け渡す可変項目一式
///
/// ToDo の可変 3 項目（タイトル・本文・ステータス）をまとめた型。
/// 更新はこの型による全項目の上書きのみで、部分更新は存在しない。
/// ID とタイムスタンプはストア管理のため含まれない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoContent {
    pub title:  TodoTitle,
    pub body:   String,
    pub status: bool,
}

// =========================================================================
// Todo（エンティティ）
// =========================================================================

/// ToDo エンティティ
///
/// ストアに永続化された ToDo を表す。ID とタイムスタンプはストアが
/// 採番・管理するため、このエンティティは DB の行からの復元
/// （[`Todo::from_db`]）によってのみ生成される。
///
/// # 不変条件
///
/// - `id` は 1 以上（[`TodoId`] で保証）
/// - `title` は 3 文字以上（[`TodoTitle`] で保証）
/// - `created_at` と `id` は生成後に変化しない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id:         TodoId,
    title:      TodoTitle,
    body:       String,
    status:     bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Todo {
    /// DB から取得した値でエンティティを復元する
    ///
    /// バリデーションは値オブジェクトの生成時に実施済みのため、
    /// ここでは行わない。
    pub fn from_db(
        id: TodoId,
        title: TodoTitle,
        body: String,
        status: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            body,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &TodoTitle {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn status(&self) -> bool {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

// =========================================================================
// テスト
// =========================================================================
