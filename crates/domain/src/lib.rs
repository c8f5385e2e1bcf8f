//! # ToDo ドメイン層
//!
//! ビジネスロジックの中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`todo::Todo`]）
//! - **値オブジェクト**: 生成時にバリデーションを行う不変オブジェクト
//!   （[`todo::TodoId`], [`todo::TodoTitle`]）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）に一切依存しない。
//! これにより、ビジネスロジックの純粋性が保たれる。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`todo`] - ToDo エンティティと値オブジェクト

pub mod error;
pub mod todo;

pub use error::DomainError;
