//! Document Snapshot Abstraction
//!
//! This module defines the trait for querying a rendered document by selector.
//! It is the ONLY engine-dependent operation the resolver needs.
//!
//! Implementations:
//! - Headless Chromium: `storecheck_h::PageSnapshot` evaluates `querySelectorAll`
//! - Tests: `MemorySnapshot` serves canned matches

use crate::element::ElementHandle;
use async_trait::async_trait;
use thiserror::Error;

/// Query a document snapshot for elements matching a selector.
///
/// Implementations must be read-only. A snapshot whose page has navigated away
/// must fail with [`ResolutionError::DocumentUnavailable`] instead of answering
/// from the new page.
#[async_trait]
pub trait DocumentSnapshot: Send + Sync {
    /// Returns every match in document order; an empty vec means no match.
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, ResolutionError>;
}

/// Errors that can occur during selector resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// The query engine rejected the selector string.
    #[error("Invalid selector syntax: {selector}")]
    InvalidSelectorSyntax { selector: String },

    /// The snapshot is stale or detached (the page navigated away).
    #[error("Document unavailable: {reason}")]
    DocumentUnavailable { reason: String },

    /// Resolution was asked to pick from an empty candidate list.
    #[error("No selector candidates supplied")]
    NoCandidates,

    /// Engine execution error (transport, timeout, malformed reply)
    #[error("Backend error: {0}")]
    Backend(String),
}

impl ResolutionError {
    pub fn code(&self) -> &'static str {
        match self {
            ResolutionError::InvalidSelectorSyntax { .. } => "SELECTOR_INVALID",
            ResolutionError::DocumentUnavailable { .. } => "DOCUMENT_UNAVAILABLE",
            ResolutionError::NoCandidates => "NO_CANDIDATES",
            ResolutionError::Backend(_) => "BACKEND_ERROR",
        }
    }

    /// Stale documents can be re-snapshotted by the caller; nothing else is recoverable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ResolutionError::DocumentUnavailable { .. })
    }
}
