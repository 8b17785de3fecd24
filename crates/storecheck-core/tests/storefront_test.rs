use async_trait::async_trait;
use storecheck_core::config::{StorecheckConfig, TimingConfig};
use storecheck_core::storefront::selectors::{
    ABOUT_LINK, BODY, GATE_SUBMIT, MAIN_CONTENT, MENU_TOGGLE, NAV_LINKS, PASSWORD_INPUT,
    PRODUCT_IMAGE, PRODUCT_LINKS, PRODUCT_PRICE, PRODUCT_TITLE, SHOP_LINKS, banner_selector,
};
use storecheck_core::storefront::{GateStatus, StoreCheck, pass_gate};
use storecheck_core::suite::{CaseStatus, CheckError, RunReport, Runner};
use storecheck_core::{
    Browser, BrowserError, DocumentSnapshot, ElementHandle, MemoryDocument, NavigationResult,
};

const BASE: &str = "https://beans.test";
const PASSWORD: &str = "loowep";
const INTRO: &str = "Since 1801, RealBeans has roasted premium coffee in Antwerp for Europe's finest cafes. Ethically sourced beans, crafted with care.";

#[derive(Debug, Clone, Copy)]
struct Theme {
    gated: bool,
    intro: bool,
    home_products: bool,
    sort_control: bool,
    desktop_nav: bool,
    catalog_cards: bool,
    catalog_links: bool,
    /// Only a hidden banner carries a `src`; the visible one has none.
    broken_banner: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            gated: true,
            intro: true,
            home_products: true,
            sort_control: true,
            desktop_nav: true,
            catalog_cards: true,
            catalog_links: true,
            broken_banner: false,
        }
    }
}

fn visible(tag: &str) -> ElementHandle {
    ElementHandle::new(0, tag).visible()
}

fn text(tag: &str, content: &str) -> ElementHandle {
    visible(tag).with_text(content)
}

fn link(href: &str, label: &str, shown: bool) -> ElementHandle {
    let el = ElementHandle::new(0, "a")
        .with_attr("href", href)
        .with_text(label);
    if shown { el.visible() } else { el }
}

/// A fake storefront: routes URLs to in-memory pages and emulates the gate,
/// link clicks, the menu drawer and the sort control.
struct MockStore {
    theme: Theme,
    launched: bool,
    unlocked: bool,
    typed: Option<String>,
    url: String,
    document: MemoryDocument,
    actions: Vec<String>,
}

impl MockStore {
    fn new(theme: Theme) -> Self {
        Self {
            theme,
            launched: true,
            unlocked: false,
            typed: None,
            url: "about:blank".to_string(),
            document: MemoryDocument::new(),
            actions: Vec::new(),
        }
    }

    fn go(&mut self, target: &str) {
        let mut path = target.strip_prefix(BASE).unwrap_or(target).to_string();
        if path.is_empty() {
            path = "/".to_string();
        }
        if self.theme.gated && !self.unlocked && !path.starts_with("/password") {
            path = "/password".to_string();
        }
        self.url = format!("{}{}", BASE, path);
        let page = self.page_for(&path);
        self.document.navigate(page);
    }

    fn page_for(&self, path: &str) -> MemoryDocument {
        let route = path.split('?').next().unwrap_or(path);
        let theme = self.theme;
        match route {
            "/password" => MemoryDocument::new()
                .with(PASSWORD_INPUT, vec![visible("input")])
                .with(GATE_SUBMIT, vec![visible("button")])
                .with(MAIN_CONTENT, vec![visible("main")])
                .with(BODY, vec![text("body", "Opening soon. Enter using password")]),
            "/" => {
                let intro = if theme.intro { INTRO } else { "Welcome to our shop" };
                let nav = if theme.desktop_nav {
                    vec![
                        link("/", "Home", true),
                        link("/collections/all", "Catalog", true),
                        link("/pages/about", "About us", true),
                    ]
                } else {
                    vec![link("/pages/about", "About us", false)]
                };
                let banner = if theme.broken_banner {
                    vec![
                        visible("img"),
                        ElementHandle::new(1, "img").with_attr("src", "//cdn.shop/files/banner.jpg"),
                    ]
                } else {
                    vec![visible("img").with_attr("src", "//cdn.shop/files/banner.jpg")]
                };
                let mut doc = MemoryDocument::new()
                    .with(BODY, vec![text("body", intro)])
                    .with(MAIN_CONTENT, vec![visible("main")])
                    .with(&banner_selector("RealBeans"), banner)
                    .with(SHOP_LINKS, vec![link("/collections/all", "Shop all", true)])
                    .with(NAV_LINKS, nav)
                    .with(MENU_TOGGLE, vec![visible("button")]);
                if theme.home_products {
                    doc = doc.with_count(".product-card", "div", 4);
                }
                doc
            }
            "/collections/all" => {
                let mut doc = MemoryDocument::new().with(
                    BODY,
                    vec![text("body", "Espresso Blend Colombian Single Origin")],
                );
                if theme.catalog_cards {
                    doc = doc.with_count(".card-product", "div", 3);
                }
                if theme.catalog_links {
                    doc = doc.with(
                        PRODUCT_LINKS,
                        vec![
                            link("/products/hidden-roast", "Hidden", false),
                            link("/products/espresso-blend", "Espresso Blend", true),
                        ],
                    );
                }
                if theme.sort_control {
                    doc = doc.with(r#"select[name*="sort_by"]"#, vec![visible("select")]);
                }
                doc
            }
            "/pages/about" => MemoryDocument::new().with(
                BODY,
                vec![text(
                    "body",
                    "From a small Antwerp grocery to a European coffee staple. \
                     RealBeans honors tradition while innovating for the future. \
                     Our beans are roasted in-house, shipped from Antwerp or Stockholm.",
                )],
            ),
            p if p.starts_with("/products/") => MemoryDocument::new()
                .with(PRODUCT_TITLE, vec![text("h1", "Espresso Blend")])
                .with(PRODUCT_PRICE, vec![text("span", "€12,00")])
                .with(
                    PRODUCT_IMAGE,
                    vec![
                        visible("img")
                            .with_attr("src", "//cdn.shop/espresso.jpg")
                            .with_attr("alt", ""),
                    ],
                ),
            _ => MemoryDocument::new().with(BODY, vec![text("body", "404 Not Found")]),
        }
    }
}

#[async_trait]
impl Browser for MockStore {
    async fn launch(&mut self) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.launched
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BrowserError> {
        self.actions.push(format!("goto {}", url));
        self.go(url);
        Ok(NavigationResult {
            url: self.url.clone(),
            title: "RealBeans".to_string(),
        })
    }

    async fn current_url(&mut self) -> Result<String, BrowserError> {
        Ok(self.url.clone())
    }

    async fn snapshot(&mut self) -> Result<Box<dyn DocumentSnapshot>, BrowserError> {
        Ok(Box::new(self.document.snapshot()))
    }

    async fn type_text(
        &mut self,
        selector: &str,
        _index: usize,
        text: &str,
    ) -> Result<(), BrowserError> {
        self.actions.push(format!("type {}", selector));
        self.typed = Some(text.to_string());
        Ok(())
    }

    async fn click(&mut self, selector: &str, index: usize) -> Result<(), BrowserError> {
        self.actions.push(format!("click {} #{}", selector, index));
        if selector == GATE_SUBMIT {
            if self.typed.as_deref() == Some(PASSWORD) {
                self.unlocked = true;
                self.go(BASE);
            }
            return Ok(());
        }
        if selector == MENU_TOGGLE {
            self.document
                .insert(ABOUT_LINK, vec![link("/pages/about", "About us", true)]);
            return Ok(());
        }

        let elements = self.document.snapshot().query_all(selector).await?;
        let href = elements
            .get(index)
            .ok_or_else(|| BrowserError::ElementNotFound {
                selector: selector.to_string(),
                index,
            })?
            .attr("href")
            .map(str::to_string);
        if let Some(href) = href {
            self.go(&href);
        }
        Ok(())
    }

    async fn select_option(
        &mut self,
        selector: &str,
        _index: usize,
        value: &str,
    ) -> Result<(), BrowserError> {
        self.actions.push(format!("select {} {}", selector, value));
        self.go(&format!("/collections/all?sort_by={}", value));
        Ok(())
    }

    async fn clear_cookies(&mut self) -> Result<(), BrowserError> {
        self.unlocked = false;
        Ok(())
    }
}

fn test_config(password: Option<&str>) -> StorecheckConfig {
    let mut config = StorecheckConfig::default();
    config.store.base_url = BASE.to_string();
    config.store.password = password.map(str::to_string);
    config.timing = TimingConfig {
        gate_timeout_ms: 50,
        settle_ms: 0,
        catalog_settle_ms: 0,
        drawer_settle_ms: 0,
        poll_interval_ms: 5,
    };
    config
}

fn status_of<'a>(report: &'a RunReport, name: &str) -> &'a CaseStatus {
    &report
        .results
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no result for {}", name))
        .status
}

#[tokio::test]
async fn test_gate_accepts_credential() {
    let mut store = MockStore::new(Theme::default());
    let config = test_config(Some(PASSWORD));

    let status = pass_gate(&mut store, &config).await.unwrap();

    assert_eq!(status, GateStatus::Passed);
    assert_eq!(store.url, "https://beans.test/");
    assert!(store.actions.contains(&format!("type {}", PASSWORD_INPUT)));
}

#[tokio::test]
async fn test_gate_is_skipped_for_open_store() {
    let mut store = MockStore::new(Theme {
        gated: false,
        ..Theme::default()
    });
    let config = test_config(None);

    let status = pass_gate(&mut store, &config).await.unwrap();

    assert_eq!(status, GateStatus::Open);
    assert!(store.typed.is_none());
}

#[tokio::test]
async fn test_gate_without_credential_is_a_config_error() {
    let mut store = MockStore::new(Theme::default());
    let config = test_config(None);

    let err = pass_gate(&mut store, &config).await.unwrap_err();
    assert!(matches!(err, CheckError::Config(_)));
    assert_eq!(err.code(), "CONFIG_ERROR");
}

#[tokio::test]
async fn test_gate_rejects_wrong_credential() {
    let mut store = MockStore::new(Theme::default());
    let config = test_config(Some("wrong"));

    let err = pass_gate(&mut store, &config).await.unwrap_err();
    match err {
        CheckError::Expectation(failure) => {
            assert_eq!(failure.expected, "URL without '/password'");
            assert!(failure.actual.contains("/password"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_full_run_on_desktop_theme() {
    let mut store = MockStore::new(Theme::default());
    let config = test_config(Some(PASSWORD));

    let report = Runner::new()
        .run(&mut store, &config, &StoreCheck::ALL)
        .await;

    assert_eq!(report.results.len(), StoreCheck::ALL.len());
    for result in &report.results {
        assert_eq!(
            result.status,
            CaseStatus::Passed,
            "{} > {}",
            result.suite,
            result.name
        );
    }
    assert_eq!(report.exit_code(), 0);
    assert!(
        store
            .actions
            .contains(&r#"select select[name*="sort_by"] price-ascending"#.to_string())
    );
    // The hidden product link is passed over for the visible one
    assert!(store.actions.contains(&format!("click {} #1", PRODUCT_LINKS)));
}

#[tokio::test]
async fn test_minimal_theme_skips_sorting_and_uses_fallbacks() {
    let mut store = MockStore::new(Theme {
        home_products: false,
        sort_control: false,
        desktop_nav: false,
        ..Theme::default()
    });
    let config = test_config(Some(PASSWORD));

    let report = Runner::new()
        .run(&mut store, &config, &StoreCheck::ALL)
        .await;

    assert!(matches!(
        status_of(&report, "sorts products by price"),
        CaseStatus::Skipped { .. }
    ));
    assert_eq!(
        status_of(&report, "shows a product list or a shop link"),
        &CaseStatus::Passed
    );
    assert_eq!(
        status_of(&report, "about page is reachable from navigation"),
        &CaseStatus::Passed
    );
    assert!(store.actions.contains(&format!("click {} #0", MENU_TOGGLE)));
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.exit_code(), 0);
}

#[tokio::test]
async fn test_failed_case_does_not_stop_the_run() {
    let mut store = MockStore::new(Theme {
        intro: false,
        ..Theme::default()
    });
    let config = test_config(Some(PASSWORD));

    let report = Runner::new()
        .run(&mut store, &config, &StoreCheck::ALL)
        .await;

    match status_of(&report, "displays the intro text") {
        CaseStatus::Failed { code, reason } => {
            assert_eq!(code, "EXPECTATION_FAILED");
            assert!(reason.starts_with("homepage intro: expected visible text"));
        }
        other => panic!("unexpected status {:?}", other),
    }
    assert_eq!(report.failed(), 1);
    assert_eq!(report.passed(), StoreCheck::ALL.len() - 1);
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn test_filter_selects_matching_cases() {
    let mut store = MockStore::new(Theme::default());
    let config = test_config(Some(PASSWORD));

    let report = Runner::new()
        .with_filter("About Page")
        .run(&mut store, &config, &StoreCheck::ALL)
        .await;

    assert_eq!(report.results.len(), 2);
    assert!(report.results.iter().all(|r| r.suite == "About Page"));
}

#[tokio::test]
async fn test_gate_failure_fails_every_case() {
    let mut store = MockStore::new(Theme::default());
    let config = test_config(None);

    let report = Runner::new()
        .run(&mut store, &config, &StoreCheck::ALL)
        .await;

    assert_eq!(report.failed(), StoreCheck::ALL.len());
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn test_catalog_falls_back_to_product_links() {
    let mut store = MockStore::new(Theme {
        catalog_cards: false,
        ..Theme::default()
    });
    let config = test_config(Some(PASSWORD));

    let report = Runner::new()
        .with_filter("lists catalog items")
        .run(&mut store, &config, &StoreCheck::ALL)
        .await;

    assert_eq!(report.results.len(), 1);
    assert_eq!(status_of(&report, "lists catalog items"), &CaseStatus::Passed);
}

#[tokio::test]
async fn test_catalog_without_products_or_links_fails() {
    let mut store = MockStore::new(Theme {
        catalog_cards: false,
        catalog_links: false,
        ..Theme::default()
    });
    let config = test_config(Some(PASSWORD));

    let report = Runner::new()
        .with_filter("lists catalog items")
        .run(&mut store, &config, &StoreCheck::ALL)
        .await;

    match status_of(&report, "lists catalog items") {
        CaseStatus::Failed { code, reason } => {
            assert_eq!(code, "EXPECTATION_FAILED");
            assert!(reason.starts_with("product links in catalog: expected"));
        }
        other => panic!("unexpected status {:?}", other),
    }
    assert_eq!(report.exit_code(), 1);
}

#[tokio::test]
async fn test_banner_source_must_belong_to_the_visible_image() {
    let mut store = MockStore::new(Theme {
        broken_banner: true,
        ..Theme::default()
    });
    let config = test_config(Some(PASSWORD));

    let report = Runner::new()
        .with_filter("banner")
        .run(&mut store, &config, &StoreCheck::ALL)
        .await;

    match status_of(&report, "displays the banner image") {
        CaseStatus::Failed { code, reason } => {
            assert_eq!(code, "EXPECTATION_FAILED");
            assert!(reason.contains("has no 'src'"));
        }
        other => panic!("unexpected status {:?}", other),
    }
}

#[tokio::test]
async fn test_unlaunched_browser_fails_without_navigating() {
    let mut store = MockStore::new(Theme::default());
    store.launched = false;
    let config = test_config(Some(PASSWORD));

    let report = Runner::new()
        .run(&mut store, &config, &StoreCheck::ALL)
        .await;

    assert_eq!(report.failed(), StoreCheck::ALL.len());
    assert!(report.results.iter().all(|r| matches!(
        &r.status,
        CaseStatus::Failed { code, .. } if code == "NOT_READY"
    )));
    assert!(store.actions.is_empty());
}
