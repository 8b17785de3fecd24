use crate::cdp::CdpClient;
use crate::script::{self, ActionReply, ElementAction, EvalError};
use crate::snapshot::PageSnapshot;
use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::network::ClearBrowserCookiesParams;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use storecheck_core::config::BrowserConfig;
use storecheck_core::{
    Browser, BrowserError, DocumentSnapshot, NavigationResult, ResolutionError,
};
use tracing::{debug, info};

static SNAPSHOT_SEQ: AtomicU64 = AtomicU64::new(0);

pub struct HeadlessBrowser {
    client: Option<CdpClient>,
    config: BrowserConfig,
}

impl HeadlessBrowser {
    pub fn new() -> Self {
        Self::from_config(&BrowserConfig::default())
    }

    pub fn from_config(config: &BrowserConfig) -> Self {
        Self {
            client: None,
            config: config.clone(),
        }
    }

    fn page(&self) -> Result<&chromiumoxide::Page, BrowserError> {
        self.client
            .as_ref()
            .map(|c| &c.page)
            .ok_or(BrowserError::NotReady)
    }

    async fn get_navigation_result(
        page: &chromiumoxide::Page,
    ) -> Result<NavigationResult, BrowserError> {
        let title = page
            .get_title()
            .await
            .unwrap_or_default()
            .unwrap_or_default();
        let url = page
            .url()
            .await
            .map_err(|e| BrowserError::Navigation(e.to_string()))?
            .unwrap_or_default();
        Ok(NavigationResult { url, title })
    }

    async fn act(
        &self,
        selector: &str,
        index: usize,
        action: ElementAction<'_>,
    ) -> Result<(), BrowserError> {
        let page = self.page()?;
        let expression = script::element_action(selector, index, &action);
        let value = match script::evaluate_with_timeout(page, &expression).await {
            Ok(value) => value,
            // The action itself navigated away before the reply came back
            Err(EvalError::Context(err)) if matches!(action, ElementAction::Click) => {
                debug!("Context replaced during click: {}", err);
                return Ok(());
            }
            Err(EvalError::Context(err)) | Err(EvalError::Other(err)) => {
                return Err(BrowserError::ScriptError(err));
            }
            Err(EvalError::Timeout) => {
                return Err(BrowserError::Timeout {
                    operation: format!("action on {}", selector),
                });
            }
        };

        match serde_json::from_value::<ActionReply>(value)? {
            ActionReply::Ok => Ok(()),
            ActionReply::Invalid { message } => {
                debug!("Selector rejected by engine: {}", message);
                Err(BrowserError::SelectorInvalid {
                    selector: selector.to_string(),
                })
            }
            ActionReply::Missing => Err(BrowserError::ElementNotFound {
                selector: selector.to_string(),
                index,
            }),
            ActionReply::NoOption => match action {
                ElementAction::Select(value) => Err(BrowserError::OptionNotFound {
                    value: value.to_string(),
                }),
                _ => Err(BrowserError::ElementNotInteractable {
                    selector: selector.to_string(),
                    reason: "not a select element".to_string(),
                }),
            },
        }
    }
}

impl Default for HeadlessBrowser {
    fn default() -> Self {
        Self::new()
    }
}

fn candidate_token() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    let seq = SNAPSHOT_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}", std::process::id(), nanos, seq)
}

#[async_trait]
impl Browser for HeadlessBrowser {
    async fn launch(&mut self) -> Result<(), BrowserError> {
        self.client = Some(CdpClient::launch(&self.config).await?);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if let Some(client) = self.client.take() {
            client.close().await?;
        }
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BrowserError> {
        let page = self.page()?;

        info!("Navigating to: {}", url);
        page.goto(url)
            .await
            .map_err(|e| BrowserError::Navigation(e.to_string()))?;

        Self::get_navigation_result(page).await
    }

    async fn current_url(&mut self) -> Result<String, BrowserError> {
        let page = self.page()?;
        let url = page
            .url()
            .await
            .map_err(|e| BrowserError::Navigation(e.to_string()))?
            .unwrap_or_default();
        Ok(url)
    }

    async fn snapshot(&mut self) -> Result<Box<dyn DocumentSnapshot>, BrowserError> {
        let page = self.page()?;
        let expression = script::stamp(&candidate_token());
        let token = match script::evaluate_with_timeout(page, &expression).await {
            Ok(serde_json::Value::String(token)) => token,
            Ok(other) => {
                return Err(BrowserError::ScriptError(format!(
                    "Unexpected document tag: {}",
                    other
                )));
            }
            Err(EvalError::Timeout) => {
                return Err(BrowserError::Timeout {
                    operation: "snapshot".to_string(),
                });
            }
            Err(EvalError::Context(reason)) => {
                return Err(ResolutionError::DocumentUnavailable { reason }.into());
            }
            Err(EvalError::Other(err)) => return Err(BrowserError::ScriptError(err)),
        };
        debug!(token = %token, "Took page snapshot");
        Ok(Box::new(PageSnapshot::new(page.clone(), token)))
    }

    async fn type_text(
        &mut self,
        selector: &str,
        index: usize,
        text: &str,
    ) -> Result<(), BrowserError> {
        self.act(selector, index, ElementAction::Type(text)).await
    }

    async fn click(&mut self, selector: &str, index: usize) -> Result<(), BrowserError> {
        self.act(selector, index, ElementAction::Click).await
    }

    async fn select_option(
        &mut self,
        selector: &str,
        index: usize,
        value: &str,
    ) -> Result<(), BrowserError> {
        self.act(selector, index, ElementAction::Select(value)).await
    }

    async fn clear_cookies(&mut self) -> Result<(), BrowserError> {
        let page = self.page()?;
        page.execute(ClearBrowserCookiesParams::default())
            .await
            .map_err(|e| BrowserError::Other(format!("Clear cookies failed: {}", e)))?;
        Ok(())
    }
}
