//! # エラーレスポンス共通型
//!
//! API がエラー時に返す JSON ボディの共通型を提供する。
//! すべてのエラーステータス（400 / 404 / 500）で同じ形状を使用する:
//!
//! ```json
//! {
//!   "error": "タイトルは 3 文字以上である必要があります"
//! }
//! ```

use serde::{Deserialize, Serialize};

/// エラーレスポンス
///
/// エラーの詳細は `error` フィールドの人間可読なメッセージのみで表現する。
/// ステータスコードは HTTP レスポンスのステータス行が担うため、
/// ボディには含めない。
///
/// ## 使用例
///
/// ```
/// use todo_shared::ErrorResponse;
///
/// let response = ErrorResponse::new("ToDo が見つかりません");
/// assert_eq!(response.error, "ToDo が見つかりません");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 人間可読なエラーメッセージ
    pub error: String,
}

impl ErrorResponse {
    /// 新しいエラーレスポンスを作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
