//! In-memory documents for exercising candidate lists without a browser.
//!
//! Selectors are looked up verbatim: a `MemoryDocument` knows nothing about
//! CSS and answers only for the selectors it was populated with.

use super::snapshot::{DocumentSnapshot, ResolutionError};
use crate::element::ElementHandle;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Default)]
struct Content {
    matches: HashMap<String, Vec<ElementHandle>>,
    rejected: HashSet<String>,
}

/// A mutable in-memory page.
///
/// Every [`navigate`](MemoryDocument::navigate) bumps a generation counter;
/// snapshots taken before it report `DocumentUnavailable`.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    content: Content,
    generation: Arc<AtomicU64>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the matches for `selector`; indexes are assigned in order.
    pub fn with(mut self, selector: &str, elements: Vec<ElementHandle>) -> Self {
        self.insert(selector, elements);
        self
    }

    /// Register `count` visible elements of `tag` for `selector`.
    pub fn with_count(self, selector: &str, tag: &str, count: usize) -> Self {
        let elements = (0..count)
            .map(|i| ElementHandle::new(i, tag).visible())
            .collect();
        self.with(selector, elements)
    }

    /// Make queries for `selector` fail with `InvalidSelectorSyntax`.
    pub fn reject(mut self, selector: &str) -> Self {
        self.content.rejected.insert(selector.to_string());
        self
    }

    pub fn insert(&mut self, selector: &str, elements: Vec<ElementHandle>) {
        let elements = elements
            .into_iter()
            .enumerate()
            .map(|(index, el)| ElementHandle { index, ..el })
            .collect();
        self.content.matches.insert(selector.to_string(), elements);
    }

    /// Replace the page content, detaching all earlier snapshots.
    pub fn navigate(&mut self, next: MemoryDocument) {
        self.content = next.content;
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            content: self.content.clone(),
            taken_at: self.generation.load(Ordering::SeqCst),
            generation: Arc::clone(&self.generation),
        }
    }
}

/// Point-in-time view of a [`MemoryDocument`].
#[derive(Debug, Clone)]
pub struct MemorySnapshot {
    content: Content,
    taken_at: u64,
    generation: Arc<AtomicU64>,
}

impl MemorySnapshot {
    pub fn is_stale(&self) -> bool {
        self.generation.load(Ordering::SeqCst) != self.taken_at
    }
}

#[async_trait]
impl DocumentSnapshot for MemorySnapshot {
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, ResolutionError> {
        if self.is_stale() {
            return Err(ResolutionError::DocumentUnavailable {
                reason: "page navigated after snapshot".to_string(),
            });
        }
        if self.content.rejected.contains(selector) {
            return Err(ResolutionError::InvalidSelectorSyntax {
                selector: selector.to_string(),
            });
        }
        Ok(self
            .content
            .matches
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }
}
