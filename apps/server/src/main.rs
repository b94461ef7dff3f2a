use finage_mcp_server::{build_state, config::Config, init_tracing, mcp};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before the subscriber reads FINAGE_LOG_FORMAT and RUST_LOG.
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env()?;
    let server = build_state(&config)?;

    tracing::info!(
        "{} {} serving tools over stdio",
        config.server_name,
        env!("CARGO_PKG_VERSION")
    );
    mcp::serve_stdio(server).await?;
    tracing::info!("stdin closed, shutting down");
    Ok(())
}
