use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorecheckConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub browser: BrowserConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Gate credential. Usually supplied through `STORECHECK_PASSWORD`.
    #[serde(default)]
    pub password: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            password: None,
        }
    }
}

fn default_base_url() -> String {
    "https://r0987077-realbeans.myshopify.com".to_string()
}

impl StoreConfig {
    /// Absolute URL of `path` on the store.
    pub fn page_url(&self, path: &str) -> Result<String, url::ParseError> {
        let base = url::Url::parse(&self.base_url)?;
        Ok(base.join(path)?.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    #[serde(default = "default_gate_timeout_ms")]
    pub gate_timeout_ms: u64,
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default = "default_catalog_settle_ms")]
    pub catalog_settle_ms: u64,
    #[serde(default = "default_drawer_settle_ms")]
    pub drawer_settle_ms: u64,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            gate_timeout_ms: default_gate_timeout_ms(),
            settle_ms: default_settle_ms(),
            catalog_settle_ms: default_catalog_settle_ms(),
            drawer_settle_ms: default_drawer_settle_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl TimingConfig {
    pub fn gate_timeout(&self) -> Duration {
        Duration::from_millis(self.gate_timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn catalog_settle(&self) -> Duration {
        Duration::from_millis(self.catalog_settle_ms)
    }

    pub fn drawer_settle(&self) -> Duration {
        Duration::from_millis(self.drawer_settle_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_gate_timeout_ms() -> u64 {
    10000
}

fn default_settle_ms() -> u64 {
    2000
}

fn default_catalog_settle_ms() -> u64 {
    3000
}

fn default_drawer_settle_ms() -> u64 {
    500
}

fn default_poll_interval_ms() -> u64 {
    100
}

/// Copy the storefront is expected to show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_brand")]
    pub brand: String,
    #[serde(default = "default_intro_text")]
    pub intro_text: String,
    #[serde(default = "default_product_keywords")]
    pub product_keywords: Vec<String>,
    #[serde(default = "default_about_phrases")]
    pub about_phrases: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            intro_text: default_intro_text(),
            product_keywords: default_product_keywords(),
            about_phrases: default_about_phrases(),
        }
    }
}

fn default_brand() -> String {
    "RealBeans".to_string()
}

fn default_intro_text() -> String {
    "Since 1801, RealBeans has roasted premium coffee in Antwerp for Europe's finest cafes. \
     Ethically sourced beans, crafted with care."
        .to_string()
}

fn default_product_keywords() -> Vec<String> {
    vec![
        "Espresso".to_string(),
        "Colombian".to_string(),
        "Coffee".to_string(),
        "Blended".to_string(),
    ]
}

fn default_about_phrases() -> Vec<String> {
    vec![
        "From a small Antwerp grocery to a European coffee staple".to_string(),
        "RealBeans honors tradition while innovating for the future".to_string(),
        "Our beans are roasted in-house, shipped from Antwerp or Stockholm".to_string(),
    ]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Launch with a visible window instead of headless.
    #[serde(default)]
    pub visible: bool,
    #[serde(default)]
    pub chrome_bin: Option<String>,
}
