//! # Todo API ライブラリ
//!
//! Todo API のユースケースとハンドラを公開する。
//! 結合テストから内部モジュールへのアクセスを提供する。
//!
//! ## モジュール構成
//!
//! - [`error`] - API エラー定義と HTTP レスポンスへの変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`usecase`] - ビジネスロジック

pub mod error;
pub mod handler;
pub mod usecase;
