use std::fmt::Write as _;

use crate::model::SchemaSummary;
use crate::render::detail::{Card, DetailView, Line};
use crate::render::index::IndexRow;

pub fn write_index(summary: Option<&SchemaSummary>, rows: &[IndexRow]) -> String {
    let mut out = String::new();
    if let Some(generated_at) = summary.and_then(SchemaSummary::generated_at_display) {
        let _ = writeln!(out, "generated at {generated_at}");
    }
    let _ = writeln!(out, "{} pages", rows.len());

    for row in rows {
        let marker = if row.selected { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {} [{}: {}]",
            row.label(),
            row.badge.tone.as_str(),
            row.badge.label
        );
        if let Some(counters) = &row.counters {
            let _ = writeln!(out, "    {counters}");
        }
        if let Some(score) = &row.score {
            let _ = writeln!(out, "    {score}");
        }
    }
    out
}

pub fn write_detail(view: &DetailView) -> String {
    let page = match view {
        DetailView::Prompt { message } => return format!("{message}\n"),
        DetailView::Page(page) => page,
    };

    let mut out = String::new();
    let _ = writeln!(out, "# {}", page.heading);
    if let Some(title) = &page.title {
        let _ = writeln!(out, "{title}");
    }
    if let Some(source_path) = &page.source_path {
        let _ = writeln!(out, "source: {source_path}");
    }
    if let Some(badge) = &page.confidence {
        let _ = writeln!(out, "[{}] {}", badge.tone.as_str(), badge.label);
    }

    for section in &page.sections {
        let _ = writeln!(out, "\n## {}", section.title);
        if section.cards.is_empty() {
            let _ = writeln!(out, "{}", section.empty_message);
            continue;
        }
        for card in &section.cards {
            write_card(&mut out, card, 0);
        }
    }
    out
}

fn write_card(out: &mut String, card: &Card, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{indent}- {}", card.heading);
    for line in &card.lines {
        match line {
            Line::Plain(text) => {
                let _ = writeln!(out, "{indent}  {text}");
            }
            Line::Muted(text) => {
                let _ = writeln!(out, "{indent}  ({text})");
            }
        }
    }
    if let Some(table) = &card.table {
        let _ = writeln!(out, "{indent}  | {} |", table.headers.join(" | "));
        for row in &table.rows {
            let _ = writeln!(out, "{indent}  | {} |", row.join(" | "));
        }
    }
    for child in &card.children {
        write_card(out, child, depth + 1);
    }
    if let Some(note) = card.empty_note {
        let _ = writeln!(out, "{indent}  {note}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FormDescriptor, PageSchema};
    use crate::render::detail::{detail_view, page_view};

    #[test]
    fn prompt_is_printed_verbatim() {
        assert_eq!(
            write_detail(&detail_view(None)),
            "Select a page to view its schema.\n"
        );
    }

    #[test]
    fn page_text_lists_sections_in_order() {
        let page = PageSchema {
            page_id: Some("checkout".to_owned()),
            title: Some("Checkout".to_owned()),
            forms: Some(vec![FormDescriptor {
                form_id: Some("pay".to_owned()),
                ..FormDescriptor::default()
            }]),
            ..PageSchema::default()
        };
        let text = write_detail(&DetailView::Page(page_view(&page)));

        assert!(text.starts_with("# checkout\nCheckout\n"));
        assert!(text.contains("## Forms\n- pay\n  (GET → (action unknown))\n  No fields detected for this form.\n"));
        assert!(text.contains("## Outputs\nNo outputs detected.\n"));
        let metadata = text.find("## Metadata").expect("metadata");
        let session = text.find("## Session dependencies").expect("session");
        assert!(metadata < session);
    }
}
