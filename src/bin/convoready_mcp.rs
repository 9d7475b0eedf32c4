use std::path::PathBuf;

use convoready::mcp::run_server;
use convoready::MatcherConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries MCP traffic
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn").add_directive("convoready=info".parse()?),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config_path = std::env::var_os("CONVOREADY_CONFIG").map(PathBuf::from);
    let config = MatcherConfig::load(config_path.as_deref())?;

    run_server(config).await
}
