use crate::element::ElementHandle;
use serde::Serialize;

/// Outcome of resolving a candidate list against one snapshot.
///
/// `selector` is `Some` exactly when a candidate qualified. With the default
/// rule that also means `count > 0`; with `min_matches == 0` the first
/// candidate qualifies even with no matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub selector: Option<String>,
    pub count: usize,
    pub elements: Vec<ElementHandle>,
}

impl Resolution {
    pub fn none() -> Self {
        Self::default()
    }

    pub(crate) fn matched(selector: &str, elements: Vec<ElementHandle>) -> Self {
        Self {
            selector: Some(selector.to_string()),
            count: elements.len(),
            elements,
        }
    }

    pub fn is_match(&self) -> bool {
        self.selector.is_some()
    }

    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    pub fn first(&self) -> Option<&ElementHandle> {
        self.elements.first()
    }

    pub fn first_visible(&self) -> Option<&ElementHandle> {
        self.elements.iter().find(|el| el.visible)
    }

    pub fn visible(&self) -> impl Iterator<Item = &ElementHandle> {
        self.elements.iter().filter(|el| el.visible)
    }
}
