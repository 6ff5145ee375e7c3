use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Context as _;
use serde::Serialize;

use crate::fetch::DocumentFetcher;
use crate::loader::{LoadedSchemas, SkippedPage};
use crate::local_files::LocalFile;
use crate::model::{PageSchema, SchemaSummary, SummaryPageEntry};

/// The summary, page list and selection produced by one load.
///
/// Snapshots are never mutated; selecting a page or loading new schemas produces a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub summary: Option<SchemaSummary>,
    pub pages: Vec<PageSchema>,
    pub selected_page_id: Option<String>,
    pub skipped: Vec<SkippedPage>,
}

impl Snapshot {
    /// Builds a snapshot selecting the first loaded page.
    pub fn from_loaded(loaded: LoadedSchemas) -> Self {
        let selected_page_id = loaded.pages.first().and_then(|page| page.page_id.clone());
        Self {
            summary: Some(loaded.summary),
            pages: loaded.pages,
            selected_page_id,
            skipped: loaded.skipped,
        }
    }

    /// First page whose `pageId` equals `page_id`.
    pub fn page(&self, page_id: &str) -> Option<&PageSchema> {
        self.pages
            .iter()
            .find(|page| page.page_id.as_deref() == Some(page_id))
    }

    pub fn selected_page(&self) -> Option<&PageSchema> {
        self.selected_page_id
            .as_deref()
            .and_then(|page_id| self.page(page_id))
    }

    /// Copy of this snapshot with `page_id` selected, or nothing selected when it is unknown.
    pub fn with_selection(&self, page_id: &str) -> Self {
        let selected_page_id = self.page(page_id).map(|_| page_id.to_owned());
        Self {
            selected_page_id,
            ..self.clone()
        }
    }

    /// Index rows: the summary's entries, or rows derived from the loaded pages when the
    /// summary lists none. The flag is `true` for derived rows.
    pub fn index_entries(&self) -> (Vec<SummaryPageEntry>, bool) {
        let listed = self
            .summary
            .as_ref()
            .map(SchemaSummary::entries)
            .unwrap_or_default();
        if !listed.is_empty() {
            return (listed.to_vec(), false);
        }

        let derived = self
            .pages
            .iter()
            .map(|page| SummaryPageEntry {
                page_id: page.page_id.clone(),
                output: page.page_id.clone(),
                ..SummaryPageEntry::default()
            })
            .collect();
        (derived, true)
    }
}

/// Proof that a load was started; only the newest ticket may publish its result.
#[derive(Debug)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { pages: usize },
    Failed(String),
    /// A newer load started before this one finished; the result was discarded.
    Superseded,
}

/// Point-in-time view of the browser for rendering.
#[derive(Debug, Clone)]
pub struct BrowserStatus {
    pub snapshot: Arc<Snapshot>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
struct BrowserState {
    snapshot: Arc<Snapshot>,
    started: u64,
    finished: u64,
    error: Option<String>,
}

/// Owns the current [`Snapshot`] and serializes loads by generation.
///
/// Each load takes a ticket from [`SchemaBrowser::begin_load`]. When it completes, the result is
/// published only if no newer load has started since, so the most recently started load wins.
/// Readers always get a whole snapshot.
#[derive(Debug, Default)]
pub struct SchemaBrowser {
    state: Mutex<BrowserState>,
}

impl SchemaBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BrowserState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.lock().snapshot)
    }

    pub fn status(&self) -> BrowserStatus {
        let state = self.lock();
        BrowserStatus {
            snapshot: Arc::clone(&state.snapshot),
            loading: state.finished < state.started,
            error: state.error.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        let state = self.lock();
        state.finished < state.started
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn begin_load(&self) -> LoadTicket {
        let mut state = self.lock();
        state.started += 1;
        state.error = None;
        LoadTicket {
            generation: state.started,
        }
    }

    pub fn finish_load(
        &self,
        ticket: LoadTicket,
        result: anyhow::Result<LoadedSchemas>,
    ) -> LoadOutcome {
        let mut state = self.lock();
        if ticket.generation != state.started {
            tracing::debug!(
                generation = ticket.generation,
                latest = state.started,
                "discarding superseded load"
            );
            return LoadOutcome::Superseded;
        }

        state.finished = ticket.generation;
        match result {
            Ok(loaded) => {
                let snapshot = Snapshot::from_loaded(loaded);
                let pages = snapshot.pages.len();
                state.snapshot = Arc::new(snapshot);
                state.error = None;
                LoadOutcome::Applied { pages }
            }
            Err(err) => {
                let message = format!("{err:#}");
                tracing::warn!(error = %message, "load failed; keeping previous schemas");
                state.error = Some(message.clone());
                LoadOutcome::Failed(message)
            }
        }
    }

    /// Selects `page_id` and returns the page, or clears the selection when it is unknown.
    pub fn select(&self, page_id: &str) -> Option<PageSchema> {
        let mut state = self.lock();
        let next = state.snapshot.with_selection(page_id);
        let page = next.selected_page().cloned();
        state.snapshot = Arc::new(next);
        page
    }

    pub async fn load_from_base_path(
        &self,
        fetcher: &dyn DocumentFetcher,
        base: &str,
    ) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = crate::loader::load_from_base_path(fetcher, base).await;
        self.finish_load(ticket, result)
    }

    pub fn load_from_files(&self, files: &[LocalFile]) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = crate::loader::load_from_files(files);
        self.finish_load(ticket, result)
    }

    /// Reads `dir` on the blocking pool and loads it as a local file set.
    pub async fn load_from_dir(&self, dir: PathBuf) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = tokio::task::spawn_blocking(move || {
            let files = crate::local_files::read_dir_files(&dir)?;
            crate::loader::load_from_files(&files)
        })
        .await
        .context("join local directory load")
        .and_then(|result| result);
        self.finish_load(ticket, result)
    }
}
