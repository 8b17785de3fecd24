use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A matched element as reported by a document snapshot.
///
/// Handles are plain data: they describe the element at the moment the
/// snapshot was queried and do not keep the page alive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementHandle {
    /// Position within the selector's match list, in document order.
    pub index: usize,
    pub tag: String,
    /// Rendered text of the element, trimmed.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub visible: bool,
}

impl ElementHandle {
    pub fn new(index: usize, tag: impl Into<String>) -> Self {
        Self {
            index,
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn visible(mut self) -> Self {
        self.visible = true;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Case-insensitive substring match against the rendered text.
    pub fn text_contains_ignore_case(&self, needle: &str) -> bool {
        self.text.to_lowercase().contains(&needle.to_lowercase())
    }
}
