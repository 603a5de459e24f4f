mod handlers;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use color_eyre::Result;

use bot_core::{BotConfig, HttpTransport, LlamaModel, MemoryStateStore, TurnService};

/// ハンドラ間で共有するターンサービスの具象型
pub type SharedService = Arc<TurnService<LlamaModel<HttpTransport>, MemoryStateStore>>;

#[tokio::main]
async fn main() -> Result<()> {
    // エラーハンドリングの初期化
    color_eyre::install()?;

    // 環境変数のロード
    dotenvy::dotenv().ok();

    // ロギングの初期化
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,bot_web=debug")),
        )
        .init();

    // 必須環境変数の欠落はここで致命的エラーになる
    let config = BotConfig::from_env()?;

    tracing::info!(target: "bot_web", "Starting word-guess bot server...");

    // コンポーネントを明示的に構築して注入する
    let transport = HttpTransport::new(&config.endpoint, &config.api_key)?;
    let model = LlamaModel::new(transport, &config.model, config.log_requests);
    let store = MemoryStateStore::new();
    let service: SharedService = Arc::new(TurnService::new(model, store));

    // ルーティング設定
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/messages", post(handlers::messages))
        .with_state(service);

    // サーバー起動
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!(target: "bot_web", "Server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
