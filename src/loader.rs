use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::fetch::{DocumentFetcher, join_paths};
use crate::local_files::LocalFile;
use crate::model::{PageSchema, SchemaSummary};

const SUMMARY_FILE_NAME: &str = "summary.json";

/// Result of one load: the summary plus every page document that could be retrieved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadedSchemas {
    pub summary: SchemaSummary,
    pub pages: Vec<PageSchema>,
    /// Page documents that were listed but could not be retrieved.
    pub skipped: Vec<SkippedPage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPage {
    pub location: String,
    pub reason: String,
}

/// Summary location and the base that page paths are resolved against.
///
/// A base naming a `.json` document is the summary itself; pages still join onto the base as
/// given.
pub fn resolve_base(base: &str) -> (String, String) {
    let base = base.trim();
    if base.ends_with(".json") {
        (base.to_owned(), base.to_owned())
    } else {
        (join_paths(base, SUMMARY_FILE_NAME), base.to_owned())
    }
}

/// Loads `summary.json` under `base` and then each listed page in summary order.
///
/// The summary must be retrievable and valid JSON. Pages that fail to retrieve are logged,
/// recorded in [`LoadedSchemas::skipped`] and left out; a retrieved page that is not valid JSON
/// fails the whole load.
pub async fn load_from_base_path(
    fetcher: &dyn DocumentFetcher,
    base: &str,
) -> anyhow::Result<LoadedSchemas> {
    let (summary_location, page_base) = resolve_base(base);
    tracing::info!(summary = %summary_location, "loading schema summary");

    let summary_text = fetcher
        .fetch_text(&summary_location)
        .await
        .with_context(|| format!("unable to load summary at {summary_location}"))?;
    let summary: SchemaSummary = parse_json(summary_text.as_bytes(), &summary_location)?;

    let mut pages = Vec::new();
    let mut skipped = Vec::new();
    for entry in summary.entries() {
        let Some(path) = entry.document_path() else {
            tracing::debug!("summary entry has neither output nor pageId; skipping");
            continue;
        };

        let location = join_paths(&page_base, &path);
        match fetcher.fetch_text(&location).await {
            Ok(text) => {
                let page: PageSchema = parse_json(text.as_bytes(), &location)?;
                pages.push(page);
            }
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!(%location, error = %reason, "failed to load page; skipping");
                skipped.push(SkippedPage { location, reason });
            }
        }
    }

    tracing::info!(
        pages = pages.len(),
        skipped = skipped.len(),
        "loaded schemas from base path"
    );
    Ok(LoadedSchemas {
        summary,
        pages,
        skipped,
    })
}

/// Loads a user-selected file set.
///
/// With a `summary.json` (matched case-insensitively) pages are looked up by exact name or by
/// relative-path suffix and returned in summary order; entries without a matching file are
/// dropped. Without one, every `.json` file is a page and a summary is synthesized. Any file
/// that fails to parse fails the whole load.
pub fn load_from_files(files: &[LocalFile]) -> anyhow::Result<LoadedSchemas> {
    let summary_file = files
        .iter()
        .find(|file| file.name.eq_ignore_ascii_case(SUMMARY_FILE_NAME));

    let loaded = match summary_file {
        Some(summary_file) => {
            let summary: SchemaSummary =
                parse_json(&summary_file.contents, summary_file.display_path())?;

            let mut pages = Vec::new();
            for entry in summary.entries() {
                let Some(output) = entry.document_path() else {
                    continue;
                };
                let Some(file) = files.iter().find(|file| file.matches_output(&output)) else {
                    tracing::debug!(%output, "no local file for summary entry");
                    continue;
                };
                pages.push(parse_json(&file.contents, file.display_path())?);
            }

            LoadedSchemas {
                summary,
                pages,
                skipped: Vec::new(),
            }
        }
        None => {
            let mut pages = Vec::new();
            for file in files.iter().filter(|file| is_json_name(&file.name)) {
                pages.push(parse_json::<PageSchema>(&file.contents, file.display_path())?);
            }

            LoadedSchemas {
                summary: SchemaSummary::synthesized(&pages),
                pages,
                skipped: Vec::new(),
            }
        }
    };

    tracing::info!(
        files = files.len(),
        pages = loaded.pages.len(),
        summary = summary_file.is_some(),
        "loaded schemas from local files"
    );
    Ok(loaded)
}

fn is_json_name(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".json")
}

/// Parses through [`serde_json::Value`] so a repeated key keeps its last value instead of
/// failing the document. The top level must be an object.
fn parse_json<T: DeserializeOwned>(bytes: &[u8], origin: &str) -> anyhow::Result<T> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).with_context(|| format!("parse JSON: {origin}"))?;
    if !value.is_object() {
        anyhow::bail!("parse JSON: {origin}: expected an object");
    }
    serde_json::from_value(value).with_context(|| format!("parse JSON: {origin}"))
}
