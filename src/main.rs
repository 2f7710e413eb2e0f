use tool_rpc_server::{
    build_app, config::Config, demo::demo_registry, logging, mcp::McpServer, AppState, Endpoint,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let server = McpServer::new(config.server_info(), demo_registry()?);
    let state = AppState::new(vec![Endpoint::new(config.mcp_path.clone(), server)])?;
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(config.bind_socket()?).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        mcp_path = %config.mcp_path,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
