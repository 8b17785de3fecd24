//! Priority-ordered selector fallback.
//!
//! Candidates are tried most-specific first and the first one that qualifies
//! wins, even when a later, looser candidate would match more elements.

use super::result::Resolution;
use super::snapshot::{DocumentSnapshot, ResolutionError};
use tracing::debug;

/// Qualification test applied to each candidate's match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    AtLeast(usize),
    Exactly(usize),
}

impl MatchRule {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            MatchRule::AtLeast(min) => count >= min,
            MatchRule::Exactly(n) => count == n,
        }
    }
}

impl Default for MatchRule {
    fn default() -> Self {
        MatchRule::AtLeast(1)
    }
}

/// Resolve `candidates` against `document`, accepting the first candidate
/// with at least `min_matches` matches.
///
/// No qualifying candidate is not an error: the result has no selector and a
/// zero count. Query errors are returned as-is on the first candidate that
/// produces one.
pub async fn resolve<S>(
    candidates: &[&str],
    document: &S,
    min_matches: usize,
) -> Result<Resolution, ResolutionError>
where
    S: DocumentSnapshot + ?Sized,
{
    resolve_with(candidates, document, MatchRule::AtLeast(min_matches)).await
}

pub async fn resolve_with<S>(
    candidates: &[&str],
    document: &S,
    rule: MatchRule,
) -> Result<Resolution, ResolutionError>
where
    S: DocumentSnapshot + ?Sized,
{
    if candidates.is_empty() {
        return Err(ResolutionError::NoCandidates);
    }

    for candidate in candidates {
        let elements = document.query_all(candidate).await?;
        debug!(
            selector = *candidate,
            count = elements.len(),
            "Tried selector candidate"
        );
        if rule.accepts(elements.len()) {
            return Ok(Resolution::matched(candidate, elements));
        }
    }

    debug!(candidates = candidates.len(), ?rule, "No selector candidate qualified");
    Ok(Resolution::none())
}
