use storefront_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // .env is optional
    let _ = dotenv::dotenv();

    let config = Config::from_env()?;
    setup_environment(&config);

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "Storefront server starting"
    );

    let state = ServerState::initialize(&config).await?;
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
