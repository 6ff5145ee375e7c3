use serde::Serialize;

use crate::model::SummaryPageEntry;
use crate::render::{Badge, confidence_badge};
use crate::state::Snapshot;

/// One line of the page index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexRow {
    pub page_id: Option<String>,
    /// `None` for rows derived from loaded pages, which carry no counters.
    pub counters: Option<String>,
    pub badge: Badge,
    pub score: Option<String>,
    pub selected: bool,
}

impl IndexRow {
    pub fn label(&self) -> &str {
        self.page_id.as_deref().unwrap_or("(no pageId)")
    }
}

pub fn index_rows(snapshot: &Snapshot) -> Vec<IndexRow> {
    let (entries, derived) = snapshot.index_entries();
    let selected = snapshot.selected_page_id.as_deref();
    entries
        .iter()
        .map(|entry| {
            let mut row = index_row(entry, selected);
            if derived {
                row.counters = None;
            }
            row
        })
        .collect()
}

pub fn index_row(entry: &SummaryPageEntry, selected_page_id: Option<&str>) -> IndexRow {
    IndexRow {
        page_id: entry.page_id.clone(),
        counters: Some(counter_line(entry)),
        badge: confidence_badge(entry.confidence.as_deref()),
        score: entry
            .confidence_score
            .map(|score| format!("Confidence score: {score:.2}")),
        selected: entry.page_id.is_some() && entry.page_id.as_deref() == selected_page_id,
    }
}

/// Counter summary with absent counters shown as zero.
pub fn counter_line(entry: &SummaryPageEntry) -> String {
    let n = |value: Option<u64>| value.unwrap_or(0);
    let layout = if entry.frameset == Some(true) {
        " (layout)"
    } else {
        ""
    };
    format!(
        "{} forms · {} fields · {} outputs · {} frames{layout} · {} nav · {} xframe · {} params · {} hidden · {} session",
        n(entry.forms),
        n(entry.fields),
        n(entry.outputs),
        n(entry.frames),
        n(entry.navigation_targets),
        n(entry.cross_frame_interactions),
        n(entry.url_parameters),
        n(entry.hidden_fields),
        n(entry.session_dependencies),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadedSchemas;
    use crate::model::{PageSchema, SchemaSummary};
    use crate::render::BadgeTone;

    #[test]
    fn absent_counters_render_as_zero() {
        let entry = SummaryPageEntry {
            page_id: Some("login".to_owned()),
            forms: Some(2),
            fields: Some(5),
            frameset: Some(true),
            ..SummaryPageEntry::default()
        };
        assert_eq!(
            counter_line(&entry),
            "2 forms · 5 fields · 0 outputs · 0 frames (layout) · 0 nav · 0 xframe · 0 params · 0 hidden · 0 session"
        );
    }

    #[test]
    fn score_is_formatted_to_two_decimals() {
        let entry = SummaryPageEntry {
            page_id: Some("a".to_owned()),
            confidence: Some("high".to_owned()),
            confidence_score: Some(0.8765),
            ..SummaryPageEntry::default()
        };
        let row = index_row(&entry, Some("a"));
        assert_eq!(row.score.as_deref(), Some("Confidence score: 0.88"));
        assert_eq!(row.badge.tone, BadgeTone::Success);
        assert_eq!(row.badge.label, "high");
        assert!(row.selected);

        let bare = index_row(&SummaryPageEntry::default(), None);
        assert_eq!(bare.score, None);
        assert_eq!(bare.badge.label, "UNKNOWN");
        assert!(!bare.selected);
        assert_eq!(bare.label(), "(no pageId)");
    }

    #[test]
    fn rows_derived_from_pages_omit_counters() {
        let snapshot = Snapshot::from_loaded(LoadedSchemas {
            summary: SchemaSummary::default(),
            pages: vec![PageSchema {
                page_id: Some("orphan".to_owned()),
                ..PageSchema::default()
            }],
            skipped: Vec::new(),
        });
        let rows = index_rows(&snapshot);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label(), "orphan");
        assert_eq!(rows[0].counters, None);
        assert!(rows[0].selected);
    }
}
