use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    schema_browser::logging::init("info").context("init logging")?;

    let cli = schema_browser::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");
    let config = schema_browser::config::ViewerConfig::from_env();

    let output = match cli.command {
        schema_browser::cli::Command::List(args) => schema_browser::commands::list(args, &config)
            .await
            .context("list")?,
        schema_browser::cli::Command::Show(args) => schema_browser::commands::show(args, &config)
            .await
            .context("show")?,
    };
    print!("{output}");

    Ok(())
}
