//! # Todo API サーバー
//!
//! ToDo リソースの CRUD を提供する HTTP サーバー。
//!
//! ## エンドポイント
//!
//! | メソッド | パス | 説明 |
//! |---------|------|------|
//! | GET | `/health` | ヘルスチェック |
//! | POST | `/todo` | ToDo 作成 |
//! | GET | `/todo` | ToDo 一覧（`?status=` で絞り込み） |
//! | GET | `/todo/{id}` | ToDo 取得 |
//! | PUT | `/todo/{id}` | ToDo 更新（全項目上書き） |
//! | DELETE | `/todo/{id}` | ToDo 削除（論理削除） |
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `LOG_FORMAT` | No | ログ形式（`pretty` / `json`、デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,todo=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p todo-api
//!
//! # 本番環境（環境変数を直接指定）
//! API_PORT=3000 DATABASE_URL=postgres://... cargo run -p todo-api --release
//! ```

mod config;

use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use config::ApiConfig;
use todo_api::{
    handler::{
        TodoState,
        create_todo,
        delete_todo,
        get_todo,
        health_check,
        list_todos,
        update_todo,
    },
    usecase::TodoUseCaseImpl,
};
use todo_infra::{
    db,
    repository::{PostgresTodoRepository, TodoRepository},
};
use todo_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Todo API サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. データベース接続プールの作成とマイグレーション適用
/// 5. ルーターの構築と HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("api");
    init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "api").entered();

    // 設定読み込み
    let config = ApiConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "Todo API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの実行に失敗しました");
    tracing::info!("マイグレーションを適用しました");

    // 依存コンポーネントを初期化
    let todo_repository: Arc<dyn TodoRepository> = Arc::new(PostgresTodoRepository::new(pool));
    let todo_usecase = TodoUseCaseImpl::new(todo_repository);
    let todo_state = Arc::new(TodoState {
        usecase: todo_usecase,
    });

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/todo", get(list_todos).post(create_todo))
        .route(
            "/todo/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(todo_state)
        .layer(TraceLayer::new_for_http());

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Todo API サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
