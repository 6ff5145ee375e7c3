use anyhow::Context as _;

use crate::cli::{ListArgs, OutputFormat, ShowArgs, SourceArgs};
use crate::config::ViewerConfig;
use crate::fetch::fetcher_for_base;
use crate::render::detail::detail_view;
use crate::render::index::index_rows;
use crate::render::text::{write_detail, write_index};
use crate::state::{LoadOutcome, SchemaBrowser, Snapshot};

pub async fn list(args: ListArgs, config: &ViewerConfig) -> anyhow::Result<String> {
    let snapshot = load(&args.source, config).await?;
    match args.format {
        OutputFormat::Text => Ok(write_index(
            snapshot.summary.as_ref(),
            &index_rows(&snapshot),
        )),
        OutputFormat::Json => {
            let summary = snapshot.summary.clone().unwrap_or_default();
            let mut json = serde_json::to_string_pretty(&summary).context("serialize summary")?;
            json.push('\n');
            Ok(json)
        }
    }
}

pub async fn show(args: ShowArgs, config: &ViewerConfig) -> anyhow::Result<String> {
    let mut snapshot = load(&args.source, config).await?;
    if let Some(page_id) = &args.page {
        snapshot = snapshot.with_selection(page_id);
    }

    match args.format {
        OutputFormat::Text => Ok(write_detail(&detail_view(snapshot.selected_page()))),
        OutputFormat::Json => {
            let Some(page) = snapshot.selected_page() else {
                anyhow::bail!("no page selected (requested: {:?})", args.page);
            };
            let mut json = serde_json::to_string_pretty(page).context("serialize page")?;
            json.push('\n');
            Ok(json)
        }
    }
}

async fn load(source: &SourceArgs, config: &ViewerConfig) -> anyhow::Result<Snapshot> {
    let browser = SchemaBrowser::new();
    let outcome = match &source.dir {
        Some(dir) => browser.load_from_dir(dir.clone()).await,
        None => {
            let base = source
                .base
                .clone()
                .unwrap_or_else(|| config.default_base.clone());
            let fetcher = fetcher_for_base(&base, config.http_timeout)?;
            browser.load_from_base_path(fetcher.as_ref(), &base).await
        }
    };

    match outcome {
        LoadOutcome::Applied { .. } => Ok(Snapshot::clone(&browser.snapshot())),
        LoadOutcome::Failed(message) => anyhow::bail!("{message}"),
        LoadOutcome::Superseded => anyhow::bail!("load was superseded"),
    }
}
