use std::fmt::Write as _;

use crate::render::detail::{Card, DetailView, Line, detail_view};
use crate::render::index::{IndexRow, index_rows};
use crate::state::BrowserStatus;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; display: grid; grid-template-columns: 360px 1fr; min-height: 100vh; color: #1f2933; }
header { grid-column: 1 / 3; padding: 12px 20px; background: #1f2933; color: #f5f7fa; }
.sidebar { padding: 16px; border-right: 1px solid #d9e2ec; overflow-y: auto; }
.content { padding: 16px 24px; }
.panel { margin-bottom: 16px; }
.card { border: 1px solid #d9e2ec; border-radius: 6px; padding: 8px 12px; margin: 8px 0; }
.muted { color: #7b8794; }
.small { font-size: 0.85em; }
.tag { display: inline-block; border-radius: 4px; padding: 2px 6px; font-size: 0.8em; }
.tag.success { background: #c6f7e2; }
.tag.warning { background: #fff3c4; }
.tag.neutral { background: #e4e7eb; }
.alert { background: #ffe3e3; border: 1px solid #f29b9b; padding: 8px 12px; border-radius: 6px; margin-bottom: 12px; }
.page-list { list-style: none; padding: 0; }
.page-item { padding: 6px 8px; border-radius: 6px; }
.page-item.active { background: #e3f8ff; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #e4e7eb; text-align: left; padding: 4px; }
"#;

/// Renders the whole viewer page: loader forms, page index and the detail pane.
pub fn render_browser_page(status: &BrowserStatus, default_base: &str) -> String {
    let snapshot = &status.snapshot;
    let rows = index_rows(snapshot);

    let mut out = String::new();
    out.push_str("<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>Schema Browser</title>");
    let _ = write!(out, "<style>{STYLE}</style></head>\n<body>\n");
    out.push_str(
        "<header><h1>Schema Browser</h1><div class=\"small\">Inspect generated page descriptors.</div></header>\n",
    );

    out.push_str("<div class=\"sidebar\">\n");
    write_loader_panel(&mut out, status.loading, default_base);
    write_index_panel(&mut out, &rows);
    out.push_str("</div>\n");

    out.push_str("<main class=\"content\">\n");
    if let Some(error) = &status.error {
        let _ = writeln!(out, "<div class=\"alert\" role=\"alert\">{}</div>", escape_html(error));
    }
    for skipped in &snapshot.skipped {
        let _ = writeln!(
            out,
            "<div class=\"muted small\">Skipped {}</div>",
            escape_html(&skipped.location)
        );
    }
    if status.loading {
        out.push_str("<div class=\"loader\">Loading schemas…</div>\n");
    } else {
        write_detail(&mut out, &detail_view(snapshot.selected_page()));
    }
    out.push_str("</main>\n</body>\n</html>\n");
    out
}

fn write_loader_panel(out: &mut String, loading: bool, default_base: &str) {
    let disabled = if loading { " disabled" } else { "" };
    let _ = write!(
        out,
        r#"<div class="panel">
<form action="/load" method="get">
<label class="small">Base URL or path (containing summary.json)</label><br>
<input type="text" name="base" value="{base}" aria-label="Base URL">
<button type="submit"{disabled}>{load}</button>
</form>
<form action="/load-dir" method="get">
<label class="small">Local directory of JSON outputs</label><br>
<input type="text" name="dir" aria-label="Directory">
<button type="submit"{disabled}>{read}</button>
</form>
</div>
"#,
        base = escape_html(default_base),
        load = if loading { "Loading…" } else { "Load" },
        read = if loading { "Reading…" } else { "Load folder" },
    );
}

fn write_index_panel(out: &mut String, rows: &[IndexRow]) {
    out.push_str("<div class=\"panel\"><h3>Pages</h3>\n<ul class=\"page-list\">\n");
    for row in rows {
        let active = if row.selected { " active" } else { "" };
        let _ = write!(out, "<li class=\"page-item{active}\">");
        match &row.page_id {
            Some(page_id) => {
                let query: String = url::form_urlencoded::byte_serialize(page_id.as_bytes()).collect();
                let _ = write!(
                    out,
                    "<a href=\"/select?page={query}\"><strong>{}</strong></a>",
                    escape_html(page_id)
                );
            }
            None => {
                let _ = write!(out, "<strong>{}</strong>", escape_html(row.label()));
            }
        }
        let _ = write!(
            out,
            " <span class=\"tag {}\">{}</span>",
            row.badge.tone.as_str(),
            escape_html(&row.badge.label)
        );
        if let Some(counters) = &row.counters {
            let _ = write!(out, "<div class=\"muted small\">{}</div>", escape_html(counters));
        }
        if let Some(score) = &row.score {
            let _ = write!(out, "<div class=\"muted small\">{}</div>", escape_html(score));
        }
        out.push_str("</li>\n");
    }
    out.push_str("</ul></div>\n");
}

fn write_detail(out: &mut String, view: &DetailView) {
    let page = match view {
        DetailView::Prompt { message } => {
            let _ = writeln!(out, "<div class=\"muted\">{}</div>", escape_html(message));
            return;
        }
        DetailView::Page(page) => page,
    };

    out.push_str("<div class=\"panel\">\n");
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(&page.heading));
    if let Some(title) = &page.title {
        let _ = writeln!(out, "<div class=\"muted\">{}</div>", escape_html(title));
    }
    if let Some(source_path) = &page.source_path {
        let _ = writeln!(out, "<div class=\"small\">{}</div>", escape_html(source_path));
    }
    if let Some(badge) = &page.confidence {
        let _ = writeln!(
            out,
            "<div class=\"tag {}\">{}</div>",
            badge.tone.as_str(),
            escape_html(&badge.label)
        );
    }

    for section in &page.sections {
        let _ = writeln!(
            out,
            "<section class=\"section\"><h3>{}</h3>",
            escape_html(section.title)
        );
        if section.cards.is_empty() {
            let _ = writeln!(
                out,
                "<div class=\"muted\">{}</div>",
                escape_html(section.empty_message)
            );
        }
        for card in &section.cards {
            write_card(out, card);
        }
        out.push_str("</section>\n");
    }
    out.push_str("</div>\n");
}

fn write_card(out: &mut String, card: &Card) {
    let _ = write!(out, "<div class=\"card\"><h4>{}</h4>", escape_html(&card.heading));
    for line in &card.lines {
        match line {
            Line::Plain(text) => {
                let _ = write!(out, "<div class=\"small\">{}</div>", escape_html(text));
            }
            Line::Muted(text) => {
                let _ = write!(out, "<div class=\"muted small\">{}</div>", escape_html(text));
            }
        }
    }
    if let Some(table) = &card.table {
        out.push_str("<table><thead><tr>");
        for header in &table.headers {
            let _ = write!(out, "<th>{}</th>", escape_html(header));
        }
        out.push_str("</tr></thead><tbody>");
        for row in &table.rows {
            out.push_str("<tr>");
            for cell in row {
                let _ = write!(out, "<td>{}</td>", escape_html(cell));
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
    }
    for child in &card.children {
        write_card(out, child);
    }
    if let Some(note) = card.empty_note {
        let _ = write!(out, "<div class=\"muted small\">{}</div>", escape_html(note));
    }
    out.push_str("</div>\n");
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
