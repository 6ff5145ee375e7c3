use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use schema_browser::app::{AppState, router};
use schema_browser::config::ViewerConfig;
use schema_browser::fetch::fetcher_for_base;
use schema_browser::state::LoadOutcome;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Base URL or path to load at startup (also prefills the loader form).
    #[arg(long, conflicts_with = "dir")]
    base: Option<String>,

    /// Local directory of JSON outputs to load at startup.
    #[arg(long)]
    dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    schema_browser::logging::init("info,tower_http=debug")?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting schema-browser-app");

    let config = ViewerConfig::from_env();
    let default_base = args
        .base
        .clone()
        .unwrap_or_else(|| config.default_base.clone());
    let state = AppState::new(default_base, config.http_timeout);

    let initial = match (&args.base, &args.dir) {
        (_, Some(dir)) => Some(state.browser.load_from_dir(dir.clone()).await),
        (Some(base), None) => {
            let fetcher = fetcher_for_base(base, config.http_timeout)?;
            Some(
                state
                    .browser
                    .load_from_base_path(fetcher.as_ref(), base)
                    .await,
            )
        }
        (None, None) => None,
    };
    match initial {
        Some(LoadOutcome::Applied { pages }) => tracing::info!(pages, "initial load applied"),
        Some(LoadOutcome::Failed(message)) => {
            tracing::warn!(error = %message, "initial load failed; starting empty")
        }
        Some(LoadOutcome::Superseded) | None => {}
    }

    let app = router(state);
    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
