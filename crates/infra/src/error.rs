//! # インフラ層エラー定義
//!
//! データベースとの通信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **エラーの変換**: `sqlx::Error` を `#[from]` でラップ
//! - **ドメインエラーとの分離**: インフラ固有のエラーを明示
//! - **ログ可能性**: Debug によりログ出力時に詳細情報を表示

use thiserror::Error;

/// インフラ層で発生するエラー
///
/// データベースクエリの実行などで発生するエラー。
/// API 層でこのエラーを受け取り、適切な HTTP レスポンスに変換する。
#[derive(Debug, Error)]
pub enum InfraError {
    /// データベースエラー
    ///
    /// SQL クエリの実行失敗、接続エラー、制約違反など。
    #[error("データベースエラー: {0}")]
    Database(#[from] sqlx::Error),

    /// 予期しないエラー
    ///
    /// 上記に分類できない予期しないエラー。
    /// DB の行から値オブジェクトを復元できない場合など、
    /// 通常は発生しない状態を表す。
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}
