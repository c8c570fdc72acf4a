//! newsbrief server entry point.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use newsbrief_core::{init_tracing, TracingConfig};
use newsbrief_providers::FeedCredentials;
use newsbrief_server::{router, AppState, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "newsbrief-server", about = "News reading backend", version)]
struct Cli {
    /// Address to bind the HTTP listener on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Feed provider OAuth client ID.
    #[arg(long, env = "INOREADER_CLIENT_ID")]
    client_id: String,

    /// Feed provider OAuth client secret.
    #[arg(long, env = "INOREADER_CLIENT_SECRET")]
    client_secret: String,

    /// Callback URL registered with the feed provider.
    #[arg(long, env = "INOREADER_REDIRECT_URI")]
    redirect_uri: String,

    /// Persist provider tokens at this path (in-memory when absent).
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Outbound request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::debug()
    } else {
        TracingConfig::server()
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("error: failed to initialize tracing: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ServerConfig::new(
        FeedCredentials::new(cli.client_id, cli.client_secret),
        cli.redirect_uri,
    )
    .with_bind_addr(cli.bind)
    .with_timeout(Duration::from_secs(cli.timeout));

    if let Some(path) = cli.token_file {
        config = config.with_token_path(path);
    }

    let state = AppState::from_config(&config)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
