//! View projections of loaded schemas and writers for them.
//!
//! [`index`] and [`detail`] turn model values into view trees; every "missing value" display
//! default lives there. [`text`] and [`html`] only lay the trees out.

pub mod detail;
pub mod html;
pub mod index;
pub mod text;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Success,
    Warning,
    Neutral,
}

impl BadgeTone {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeTone::Success => "success",
            BadgeTone::Warning => "warning",
            BadgeTone::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub tone: BadgeTone,
    pub label: String,
}

/// `HIGH` is success, `LOW` is warning (case-insensitive); anything else is neutral.
pub fn classify_confidence(confidence: Option<&str>) -> BadgeTone {
    match confidence {
        Some(c) if c.eq_ignore_ascii_case("HIGH") => BadgeTone::Success,
        Some(c) if c.eq_ignore_ascii_case("LOW") => BadgeTone::Warning,
        _ => BadgeTone::Neutral,
    }
}

pub fn confidence_badge(confidence: Option<&str>) -> Badge {
    Badge {
        tone: classify_confidence(confidence),
        label: confidence.unwrap_or("UNKNOWN").to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_classification_ignores_case() {
        for label in ["HIGH", "high", "High"] {
            assert_eq!(classify_confidence(Some(label)), BadgeTone::Success);
        }
        for label in ["LOW", "low", "lOw"] {
            assert_eq!(classify_confidence(Some(label)), BadgeTone::Warning);
        }
        assert_eq!(classify_confidence(Some("MEDIUM")), BadgeTone::Neutral);
        assert_eq!(classify_confidence(Some("")), BadgeTone::Neutral);
        assert_eq!(classify_confidence(None), BadgeTone::Neutral);
    }

    #[test]
    fn missing_confidence_is_labelled_unknown() {
        let badge = confidence_badge(None);
        assert_eq!(badge.tone, BadgeTone::Neutral);
        assert_eq!(badge.label, "UNKNOWN");

        let badge = confidence_badge(Some("medium"));
        assert_eq!(badge.label, "medium");
    }
}
