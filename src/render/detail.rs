use serde::Serialize;

use crate::model::{
    CrossFrameInteraction, FieldDescriptor, FormDescriptor, FrameDefinition, HiddenField,
    NavigationTarget, OutputSectionDescriptor, PageMetadata, PageSchema, SessionDependency,
    UrlParameterCandidate,
};
use crate::render::{Badge, BadgeTone};

pub const SELECT_PROMPT: &str = "Select a page to view its schema.";

const UNNAMED: &str = "unnamed";
const DASH: &str = "—";
const UNKNOWN_SOURCE: &str = "unknown source";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailView {
    Prompt { message: &'static str },
    Page(PageView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub heading: String,
    pub title: Option<String>,
    pub source_path: Option<String>,
    pub confidence: Option<Badge>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub empty_message: &'static str,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Card {
    pub heading: String,
    pub lines: Vec<Line>,
    pub children: Vec<Card>,
    pub table: Option<Table>,
    /// Shown in place of `children`/`table` when the card has nothing nested.
    pub empty_note: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "text", rename_all = "snake_case")]
pub enum Line {
    Plain(String),
    Muted(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Projects the selected page (if any) into a view.
pub fn detail_view(page: Option<&PageSchema>) -> DetailView {
    match page {
        Some(page) => DetailView::Page(page_view(page)),
        None => DetailView::Prompt {
            message: SELECT_PROMPT,
        },
    }
}

pub fn page_view(page: &PageSchema) -> PageView {
    let confidence = page
        .metadata
        .as_ref()
        .and_then(|m| m.confidence.as_deref())
        .map(|c| Badge {
            tone: if c.eq_ignore_ascii_case("HIGH") {
                BadgeTone::Success
            } else {
                BadgeTone::Neutral
            },
            label: format!("Confidence: {c}"),
        });

    PageView {
        heading: page
            .page_id
            .clone()
            .unwrap_or_else(|| "Unknown page".to_owned()),
        title: page.title.clone(),
        source_path: page.source_path.clone(),
        confidence,
        sections: vec![
            Section {
                title: "Metadata",
                empty_message: "No metadata detected.",
                cards: page.metadata.as_ref().map(metadata_cards).unwrap_or_default(),
            },
            section("Forms", "No forms discovered.", page.forms.as_deref(), form_card),
            section(
                "Outputs",
                "No outputs detected.",
                page.outputs.as_deref(),
                output_card,
            ),
            section(
                "Frames",
                "No frames detected.",
                page.frame_definitions.as_deref(),
                frame_card,
            ),
            section(
                "Cross-frame interactions",
                "No cross-frame interactions detected.",
                page.cross_frame_interactions.as_deref(),
                cross_frame_card,
            ),
            section(
                "Navigation targets",
                "No navigation targets detected.",
                page.navigation_targets.as_deref(),
                navigation_card,
            ),
            section(
                "URL parameters",
                "No URL parameters detected.",
                page.url_parameter_candidates.as_deref(),
                url_parameter_card,
            ),
            section(
                "Hidden fields",
                "No hidden fields detected.",
                page.hidden_fields.as_deref(),
                hidden_field_card,
            ),
            section(
                "Session dependencies",
                "No session dependencies detected.",
                page.session_dependencies.as_deref(),
                session_card,
            ),
        ],
    }
}

fn section<T>(
    title: &'static str,
    empty_message: &'static str,
    items: Option<&[T]>,
    card: fn(&T) -> Card,
) -> Section {
    Section {
        title,
        empty_message,
        cards: items.unwrap_or_default().iter().map(card).collect(),
    }
}

fn metadata_cards(metadata: &PageMetadata) -> Vec<Card> {
    let joined = |values: &Option<Vec<String>>, sep: &str, fallback: &str| match values {
        Some(values) => values.join(sep),
        None => fallback.to_owned(),
    };

    vec![
        Card {
            heading: "Controllers".to_owned(),
            lines: vec![Line::Muted(joined(
                &metadata.controller_candidates,
                ", ",
                "n/a",
            ))],
            ..Card::default()
        },
        Card {
            heading: "Backing beans".to_owned(),
            lines: vec![Line::Muted(joined(
                &metadata.backing_bean_candidates,
                ", ",
                "n/a",
            ))],
            ..Card::default()
        },
        Card {
            heading: "Notes".to_owned(),
            lines: vec![Line::Muted(joined(
                &metadata.notes,
                " · ",
                "No notes captured",
            ))],
            ..Card::default()
        },
        Card {
            heading: "Scoring".to_owned(),
            lines: vec![
                Line::Muted(match metadata.confidence_score {
                    Some(score) => format!("score {score:.2}"),
                    None => "score n/a".to_owned(),
                }),
                Line::Muted(if metadata.frameset_page == Some(true) {
                    "frameset page".to_owned()
                } else {
                    "regular page".to_owned()
                }),
            ],
            ..Card::default()
        },
    ]
}

fn form_card(form: &FormDescriptor) -> Card {
    let heading = form
        .form_id
        .as_deref()
        .or(form.action.as_deref())
        .unwrap_or("Form")
        .to_owned();

    let mut lines = vec![Line::Muted(format!(
        "{} → {}",
        form.method.as_deref().unwrap_or("GET"),
        form.action.as_deref().unwrap_or("(action unknown)")
    ))];
    if let Some(bean) = form.backing_bean() {
        lines.push(Line::Plain(format!("Backed by: {bean}")));
    }
    if let Some(notes) = non_empty(&form.notes) {
        lines.push(Line::Muted(format!("notes: {}", notes.join(" · "))));
    }

    let children: Vec<Card> = form
        .fields
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(field_card)
        .collect();
    let empty_note = children
        .is_empty()
        .then_some("No fields detected for this form.");

    Card {
        heading,
        lines,
        children,
        table: None,
        empty_note,
    }
}

fn field_card(field: &FieldDescriptor) -> Card {
    let mut lines = Vec::new();
    if let Some(label) = &field.label {
        lines.push(Line::Muted(label.clone()));
    }

    let mut kind = field.field_type.clone().unwrap_or_else(|| "field".to_owned());
    if field.required == Some(true) {
        kind.push_str(" · required");
    }
    if let Some(max_length) = field.max_length.filter(|n| *n != 0) {
        kind.push_str(&format!(" · max {max_length}"));
    }
    if field.min.is_some() || field.max.is_some() {
        let bound = |b: &Option<crate::model::RangeBound>| {
            b.as_ref().map_or_else(|| "-".to_owned(), ToString::to_string)
        };
        kind.push_str(&format!(" · range {}–{}", bound(&field.min), bound(&field.max)));
    }
    lines.push(Line::Plain(kind));

    if let Some(placeholder) = &field.placeholder {
        lines.push(Line::Muted(format!("placeholder: {placeholder}")));
    }
    if let Some(constraints) = non_empty(&field.constraints) {
        lines.push(Line::Muted(format!("constraints: {}", constraints.join(", "))));
    }
    if let Some(bindings) = non_empty(&field.binding_expressions) {
        lines.push(Line::Muted(format!("bindings: {}", bindings.join(", "))));
    }
    if let Some(options) = non_empty(&field.options) {
        let labels: Vec<&str> = options
            .iter()
            .map(|o| o.label.as_deref().or(o.value.as_deref()).unwrap_or(""))
            .filter(|label| !label.is_empty())
            .collect();
        lines.push(Line::Muted(format!("options: {}", labels.join(", "))));
    }
    match (&field.java_type, &field.source_bean_class) {
        (Some(java_type), Some(bean)) => {
            let property = field
                .source_bean_property
                .as_deref()
                .map(|p| format!(".{p}"))
                .unwrap_or_default();
            lines.push(Line::Muted(format!("java: {java_type} from {bean}{property}")));
        }
        (Some(java_type), None) => lines.push(Line::Muted(format!("java: {java_type}"))),
        (None, Some(bean)) => lines.push(Line::Muted(format!("bean: {bean}"))),
        (None, None) => {}
    }

    Card {
        heading: field.name.clone().unwrap_or_else(|| UNNAMED.to_owned()),
        lines,
        ..Card::default()
    }
}

fn output_card(output: &OutputSectionDescriptor) -> Card {
    let heading = output
        .section_key()
        .or(output.section_type.as_deref())
        .unwrap_or("Output")
        .to_owned();

    let mut summary = output
        .section_type
        .clone()
        .unwrap_or_else(|| "Unknown".to_owned());
    if let Some(item_variable) = output.item_variable_name() {
        summary.push_str(&format!(" · item var: {item_variable}"));
    }
    let mut lines = vec![Line::Muted(summary)];
    if let Some(items) = &output.items_expression {
        lines.push(Line::Plain(format!("Items: {items}")));
    }

    let fields = output.fields.as_deref().unwrap_or_default();
    let (table, empty_note) = if fields.is_empty() {
        (None, Some("No output fields detected."))
    } else {
        let rows = fields
            .iter()
            .map(|f| {
                vec![
                    f.name.clone().unwrap_or_else(|| DASH.to_owned()),
                    f.label.clone().unwrap_or_else(|| DASH.to_owned()),
                    f.binding_expression
                        .clone()
                        .or_else(|| f.raw_text.clone())
                        .unwrap_or_else(|| DASH.to_owned()),
                    f.notes
                        .as_ref()
                        .map_or_else(|| DASH.to_owned(), |notes| notes.join(", ")),
                ]
            })
            .collect();
        (
            Some(Table {
                headers: vec!["Name", "Label", "Binding", "Notes"],
                rows,
            }),
            None,
        )
    };

    Card {
        heading,
        lines,
        children: Vec::new(),
        table,
        empty_note,
    }
}

fn frame_card(frame: &FrameDefinition) -> Card {
    let mut lines = vec![Line::Muted(format!(
        "{} → {}",
        frame.tag.as_deref().unwrap_or("frame"),
        frame.source.as_deref().unwrap_or("(source unknown)")
    ))];
    let mut placement = Vec::new();
    if let Some(parent) = &frame.parent_frame_name {
        placement.push(format!("parent: {parent}"));
    }
    if let Some(depth) = frame.depth {
        placement.push(format!("depth {depth}"));
    }
    if !placement.is_empty() {
        lines.push(Line::Plain(placement.join(" · ")));
    }
    push_confidence(&mut lines, &frame.confidence);

    Card {
        heading: frame
            .frame_name
            .clone()
            .unwrap_or_else(|| UNNAMED.to_owned()),
        lines,
        ..Card::default()
    }
}

fn cross_frame_card(interaction: &CrossFrameInteraction) -> Card {
    let mut lines = vec![Line::Muted(
        interaction
            .interaction_type
            .clone()
            .unwrap_or_else(|| "interaction".to_owned()),
    )];
    push_snippet(&mut lines, &interaction.snippet);
    push_confidence(&mut lines, &interaction.confidence);

    Card {
        heading: format!(
            "{} → {}",
            interaction.from_frame.as_deref().unwrap_or("(unknown frame)"),
            interaction.to_jsp.as_deref().unwrap_or("(unknown target)")
        ),
        lines,
        ..Card::default()
    }
}

fn navigation_card(target: &NavigationTarget) -> Card {
    let mut lines = vec![Line::Muted(format!(
        "via {}",
        target.source_pattern.as_deref().unwrap_or("unknown pattern")
    ))];
    push_snippet(&mut lines, &target.snippet);
    push_confidence(&mut lines, &target.confidence);

    Card {
        heading: target
            .target
            .clone()
            .unwrap_or_else(|| "(target unknown)".to_owned()),
        lines,
        ..Card::default()
    }
}

fn url_parameter_card(parameter: &UrlParameterCandidate) -> Card {
    let mut lines = vec![Line::Muted(
        parameter
            .source
            .clone()
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_owned()),
    )];
    push_snippet(&mut lines, &parameter.snippet);
    push_confidence(&mut lines, &parameter.confidence);

    Card {
        heading: parameter.name.clone().unwrap_or_else(|| UNNAMED.to_owned()),
        lines,
        ..Card::default()
    }
}

fn hidden_field_card(field: &HiddenField) -> Card {
    let mut lines = Vec::new();
    if let Some(default_value) = &field.default_value {
        lines.push(Line::Plain(format!("default: {default_value}")));
    }
    if let Some(expression) = &field.expression {
        lines.push(Line::Plain(format!("expression: {expression}")));
    }
    push_snippet(&mut lines, &field.snippet);
    push_confidence(&mut lines, &field.confidence);

    Card {
        heading: field.name.clone().unwrap_or_else(|| UNNAMED.to_owned()),
        lines,
        ..Card::default()
    }
}

fn session_card(dependency: &SessionDependency) -> Card {
    let mut lines = vec![Line::Muted(
        dependency
            .source
            .clone()
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_owned()),
    )];
    push_snippet(&mut lines, &dependency.snippet);
    push_confidence(&mut lines, &dependency.confidence);

    Card {
        heading: dependency
            .key
            .clone()
            .unwrap_or_else(|| "(key unknown)".to_owned()),
        lines,
        ..Card::default()
    }
}

fn push_snippet(lines: &mut Vec<Line>, snippet: &Option<String>) {
    if let Some(snippet) = snippet {
        lines.push(Line::Plain(format!("snippet: {snippet}")));
    }
}

fn push_confidence(lines: &mut Vec<Line>, confidence: &Option<String>) {
    if let Some(confidence) = confidence {
        lines.push(Line::Muted(format!("confidence: {confidence}")));
    }
}

fn non_empty<T>(values: &Option<Vec<T>>) -> Option<&[T]> {
    values.as_deref().filter(|v| !v.is_empty())
}
