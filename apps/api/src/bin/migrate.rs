//! # マイグレーションランナー
//!
//! データベースマイグレーションを単体で実行するバイナリ。
//!
//! API サーバーは起動時にもマイグレーションを適用するが、
//! デプロイ前にスキーマだけを先行して更新したい場合や、
//! CI でマイグレーションの妥当性を検証したい場合はこちらを使用する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//!
//! ## 実行方法
//!
//! ```bash
//! cargo run -p todo-api --bin migrate
//! ```

use std::env;

use todo_infra::db;
use todo_shared::observability::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("migrate");
    init_tracing(tracing_config);

    // DATABASE_URL が未設定の場合はここでパニックする
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL が設定されていません");

    let pool = db::create_pool(&database_url).await?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool).await?;
    tracing::info!("マイグレーションを適用しました");

    Ok(())
}
