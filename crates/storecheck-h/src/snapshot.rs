use crate::script::{self, EvalError, QueryReply};
use async_trait::async_trait;
use chromiumoxide::Page;
use storecheck_core::{DocumentSnapshot, ElementHandle, ResolutionError};

/// A live page pinned to the document that was loaded when it was taken.
///
/// Queries run against the live DOM; once the page navigates they fail with
/// `DocumentUnavailable` instead of answering from the new document.
#[derive(Clone)]
pub struct PageSnapshot {
    page: Page,
    token: String,
}

impl PageSnapshot {
    pub(crate) fn new(page: Page, token: String) -> Self {
        Self { page, token }
    }
}

#[async_trait]
impl DocumentSnapshot for PageSnapshot {
    async fn query_all(&self, selector: &str) -> Result<Vec<ElementHandle>, ResolutionError> {
        let expression = script::query(&self.token, selector);
        let value = match script::evaluate_with_timeout(&self.page, &expression).await {
            Ok(value) => value,
            Err(EvalError::Context(reason)) => {
                return Err(ResolutionError::DocumentUnavailable { reason });
            }
            Err(EvalError::Timeout) => {
                return Err(ResolutionError::Backend(format!(
                    "query for {} timed out",
                    selector
                )));
            }
            Err(EvalError::Other(err)) => return Err(ResolutionError::Backend(err)),
        };

        let reply: QueryReply = serde_json::from_value(value)
            .map_err(|e| ResolutionError::Backend(format!("Unexpected query reply: {}", e)))?;
        match reply {
            QueryReply::Ok { elements } => Ok(elements),
            QueryReply::Stale => Err(ResolutionError::DocumentUnavailable {
                reason: "page navigated after snapshot".to_string(),
            }),
            QueryReply::Invalid { message } => {
                tracing::debug!("Selector rejected by engine: {}", message);
                Err(ResolutionError::InvalidSelectorSyntax {
                    selector: selector.to_string(),
                })
            }
        }
    }
}
