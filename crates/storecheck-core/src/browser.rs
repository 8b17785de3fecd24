use crate::resolution::{DocumentSnapshot, ResolutionError};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct NavigationResult {
    pub url: String,
    pub title: String,
}

#[derive(thiserror::Error, Debug, Clone)]
pub enum BrowserError {
    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("No element matches {selector} at index {index}")]
    ElementNotFound { selector: String, index: usize },

    #[error("Element {selector} is not interactable: {reason}")]
    ElementNotInteractable { selector: String, reason: String },

    #[error("Option not found: {value}")]
    OptionNotFound { value: String },

    #[error("Invalid selector: {selector}")]
    SelectorInvalid { selector: String },

    #[error("Script execution error: {0}")]
    ScriptError(String),

    #[error("Timeout: {operation}")]
    Timeout { operation: String },

    #[error("Not ready")]
    NotReady,

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Other: {0}")]
    Other(String),
}

impl From<serde_json::Error> for BrowserError {
    fn from(err: serde_json::Error) -> Self {
        BrowserError::Serialization(err.to_string())
    }
}

impl BrowserError {
    pub fn code(&self) -> &'static str {
        match self {
            BrowserError::Navigation(_) => "NAVIGATION_ERROR",
            BrowserError::ElementNotFound { .. } => "ELEMENT_NOT_FOUND",
            BrowserError::ElementNotInteractable { .. } => "ELEMENT_NOT_INTERACTABLE",
            BrowserError::OptionNotFound { .. } => "OPTION_NOT_FOUND",
            BrowserError::SelectorInvalid { .. } => "SELECTOR_INVALID",
            BrowserError::ScriptError(_) => "SCRIPT_ERROR",
            BrowserError::Timeout { .. } => "TIMEOUT",
            BrowserError::NotReady => "NOT_READY",
            BrowserError::Resolution(e) => e.code(),
            BrowserError::Serialization(_) => "SERIALIZATION_ERROR",
            BrowserError::NotSupported(_) => "NOT_SUPPORTED",
            BrowserError::Other(_) => "INTERNAL_ERROR",
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        match self {
            BrowserError::ElementNotFound { .. } => "Take a fresh snapshot and re-resolve",
            BrowserError::ElementNotInteractable { .. } => "Wait for the page to settle",
            BrowserError::Timeout { .. } => "Increase timeout or verify condition",
            BrowserError::SelectorInvalid { .. } => "Fix selector syntax",
            BrowserError::Navigation(_) => "Check URL and network connectivity",
            BrowserError::NotReady => "Launch the browser first",
            BrowserError::Resolution(e) if e.is_retryable() => "Take a fresh snapshot",
            _ => "Check command parameters",
        }
    }
}

/// The browser collaborator the storefront checks drive.
///
/// Element-targeting methods take a selector and the index of the match to act
/// on, as reported by [`ElementHandle::index`](crate::element::ElementHandle).
#[async_trait]
pub trait Browser: Send + Sync {
    /// Launch the browser.
    async fn launch(&mut self) -> Result<(), BrowserError>;

    /// Close the browser and cleanup resources.
    async fn close(&mut self) -> Result<(), BrowserError>;

    /// Whether the browser is up and can take commands.
    async fn is_ready(&self) -> bool;

    /// Navigate to a specific URL.
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BrowserError>;

    /// URL of the current page, as reported by the engine.
    async fn current_url(&mut self) -> Result<String, BrowserError>;

    /// Capture the current document for resolution.
    async fn snapshot(&mut self) -> Result<Box<dyn DocumentSnapshot>, BrowserError>;

    /// Replace the value of a text input and fire input/change events.
    async fn type_text(
        &mut self,
        selector: &str,
        index: usize,
        text: &str,
    ) -> Result<(), BrowserError>;

    /// Click the element, regardless of visibility.
    async fn click(&mut self, selector: &str, index: usize) -> Result<(), BrowserError>;

    /// Choose an option of a `<select>` by value and fire a change event.
    async fn select_option(
        &mut self,
        selector: &str,
        index: usize,
        value: &str,
    ) -> Result<(), BrowserError>;

    /// Remove all cookies of the browsing session.
    async fn clear_cookies(&mut self) -> Result<(), BrowserError> {
        Err(BrowserError::NotSupported("clear_cookies".into()))
    }
}
