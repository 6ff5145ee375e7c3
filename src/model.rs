//! Data contract for the analyzer's `summary.json` and per-page descriptor documents.
//!
//! Every field is optional. Fields carrying an unexpected JSON type deserialize as absent and
//! list elements of the wrong shape are dropped. Whether a whole document is acceptable is
//! decided by the loader.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaSummary {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u64>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<SummaryPageEntry>>,
}

impl SchemaSummary {
    /// Summary entries in document order; empty when `pages` is absent.
    pub fn entries(&self) -> &[SummaryPageEntry] {
        self.pages.as_deref().unwrap_or_default()
    }

    /// Minimal summary built when a file set carries page documents but no `summary.json`.
    pub fn synthesized(pages: &[PageSchema]) -> Self {
        Self {
            generated_at: None,
            page_count: Some(pages.len() as u64),
            pages: Some(
                pages
                    .iter()
                    .map(|page| SummaryPageEntry {
                        page_id: page.page_id.clone(),
                        ..SummaryPageEntry::default()
                    })
                    .collect(),
            ),
        }
    }

    /// `generatedAt` reformatted for display when it is an RFC 3339 timestamp.
    pub fn generated_at_display(&self) -> Option<String> {
        let raw = self.generated_at.as_deref()?;
        match chrono::DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => Some(
                ts.with_timezone(&chrono::Utc)
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string(),
            ),
            Err(_) => Some(raw.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryPageEntry {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub forms: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fields: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub outputs: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub frames: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub frameset: Option<bool>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub cross_frame_interactions: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub navigation_targets: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub url_parameters: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub hidden_fields: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub session_dependencies: Option<u64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl SummaryPageEntry {
    /// Relative location of the full descriptor: `output`, else `<pageId>.json`.
    ///
    /// `None` when the entry carries neither, in which case it cannot be loaded.
    pub fn document_path(&self) -> Option<String> {
        if let Some(output) = self.output.as_deref().filter(|o| !o.is_empty()) {
            return Some(output.to_owned());
        }
        self.page_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("{id}.json"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageSchema {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub forms: Option<Vec<FormDescriptor>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<OutputSectionDescriptor>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub frame_definitions: Option<Vec<FrameDefinition>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub cross_frame_interactions: Option<Vec<CrossFrameInteraction>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub navigation_targets: Option<Vec<NavigationTarget>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub url_parameter_candidates: Option<Vec<UrlParameterCandidate>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub hidden_fields: Option<Vec<HiddenField>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub session_dependencies: Option<Vec<SessionDependency>>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageMetadata {
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub controller_candidates: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub backing_bean_candidates: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub frameset_page: Option<bool>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormDescriptor {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub backing_bean_class_name: Option<String>,
    /// Older generators spell the bean class this way.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub backing_bean_class: Option<String>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldDescriptor>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

impl FormDescriptor {
    /// `backingBeanClassName`, else the short `backingBeanClass` spelling.
    pub fn backing_bean(&self) -> Option<&str> {
        self.backing_bean_class_name
            .as_deref()
            .or(self.backing_bean_class.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OptionDescriptor>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub binding_expressions: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub min: Option<RangeBound>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub max: Option<RangeBound>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub java_type: Option<String>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub source_bean_class: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub source_bean_property: Option<String>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

/// Numeric or date bound; the analyzer emits either numbers or raw attribute strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeBound {
    Number(f64),
    Text(String),
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::Number(n) if n.is_finite() && n.fract() == 0.0 => {
                write!(f, "{}", *n as i64)
            }
            RangeBound::Number(n) => write!(f, "{n}"),
            RangeBound::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionDescriptor {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputSectionDescriptor {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub section_type: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub item_variable: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub item_var: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub items_expression: Option<String>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<OutputFieldDescriptor>>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

impl OutputSectionDescriptor {
    pub fn section_key(&self) -> Option<&str> {
        self.section_id.as_deref().or(self.id.as_deref())
    }

    pub fn item_variable_name(&self) -> Option<&str> {
        self.item_variable.as_deref().or(self.item_var.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputFieldDescriptor {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub binding_expression: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
    #[serde(deserialize_with = "lenient_list", skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrameDefinition {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub frame_name: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub parent_frame_name: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub depth: Option<i64>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CrossFrameInteraction {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub from_frame: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub to_jsp: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub interaction_type: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavigationTarget {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub source_pattern: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UrlParameterCandidate {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HiddenField {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionDependency {
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}
