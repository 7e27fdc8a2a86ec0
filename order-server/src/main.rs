use order_server::core::BoxError;
use order_server::{Config, Server, ServerState, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // 1. 加载 .env
    let _ = dotenv::dotenv();

    // 2. 加载配置, 初始化日志
    let config = Config::from_env();
    init_logger_with_file(config.log_level.as_deref(), config.log_dir.as_deref());

    tracing::info!("Starting order-server (env: {})", config.environment);

    // 3. 初始化服务器状态 (数据库, 迁移, 商品服务)
    let state = ServerState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
