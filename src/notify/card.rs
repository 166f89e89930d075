//! Message card payloads for chat webhooks.

use serde::{Deserialize, Serialize};

/// Red theme for alerts.
pub const THEME_ALERT: &str = "FF0000";

/// Green theme for informational reports.
pub const THEME_OK: &str = "008000";

const CARD_CONTEXT: &str = "http://schema.org/extensions";

/// A `MessageCard` webhook payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageCard {
    #[serde(rename = "@type")]
    pub card_type: String,

    #[serde(rename = "@context")]
    pub context: String,

    #[serde(rename = "themeColor")]
    pub theme_color: String,

    pub summary: String,

    pub sections: Vec<Section>,
}

/// One card section: a title plus either markdown text or a facts list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "activityTitle")]
    pub activity_title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub facts: Option<Vec<Fact>>,
}

/// A name/value pair in a facts section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub name: String,
    pub value: String,
}

impl Fact {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl MessageCard {
    pub fn new(theme_color: &str, summary: impl Into<String>) -> Self {
        Self {
            card_type: "MessageCard".to_string(),
            context: CARD_CONTEXT.to_string(),
            theme_color: theme_color.to_string(),
            summary: summary.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section rendering markdown text.
    pub fn with_text(mut self, title: impl Into<String>, text: impl Into<String>) -> Self {
        self.sections.push(Section {
            activity_title: title.into(),
            markdown: Some(true),
            text: Some(text.into()),
            facts: None,
        });
        self
    }

    /// Append a section listing facts.
    pub fn with_facts(mut self, title: impl Into<String>, facts: Vec<Fact>) -> Self {
        self.sections.push(Section {
            activity_title: title.into(),
            markdown: None,
            text: None,
            facts: Some(facts),
        });
        self
    }
}
