//! # リポジトリ実装
//!
//! ユースケース層から利用するリポジトリトレイトと、その具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイトにのみ依存する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod todo_repository;

pub use todo_repository::{PostgresTodoRepository, TodoRepository};
