use kirana_server::{Config, Server, ServerState, print_banner, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化环境 (dotenv + 日志)
    setup_environment()?;

    print_banner();
    tracing::info!("Starting Kirana Server...");

    // 从环境变量加载配置
    let config = Config::from_env();
    tracing::info!(
        port = config.http_port,
        environment = %config.environment,
        "Configuration loaded"
    );

    // 初始化共享状态 (数据库 + JWT + HTTP 客户端)
    let state = ServerState::initialize(&config).await;

    // 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    server.run().await?;

    Ok(())
}
