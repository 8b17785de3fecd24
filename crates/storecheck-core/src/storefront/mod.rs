//! The storefront checks, one variant per case.

mod about;
mod catalog;
pub mod gate;
mod home;
mod product;
pub mod selectors;

use crate::browser::Browser;
use crate::config::StorecheckConfig;
use crate::resolution::{MatchRule, Resolution, resolve_with};
use crate::suite::{Case, CheckError, Outcome};
use async_trait::async_trait;

pub use gate::{GateStatus, pass_gate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCheck {
    HomeIntroText,
    HomeBannerImage,
    HomeProductList,
    CatalogItems,
    CatalogSortByPrice,
    ProductInformation,
    ProductImageAltText,
    AboutContent,
    AboutFromNavigation,
    PasswordGate,
}

impl StoreCheck {
    pub const ALL: [StoreCheck; 10] = [
        StoreCheck::HomeIntroText,
        StoreCheck::HomeBannerImage,
        StoreCheck::HomeProductList,
        StoreCheck::CatalogItems,
        StoreCheck::CatalogSortByPrice,
        StoreCheck::ProductInformation,
        StoreCheck::ProductImageAltText,
        StoreCheck::AboutContent,
        StoreCheck::AboutFromNavigation,
        StoreCheck::PasswordGate,
    ];
}

#[async_trait]
impl Case for StoreCheck {
    fn suite(&self) -> &'static str {
        match self {
            StoreCheck::HomeIntroText | StoreCheck::HomeBannerImage | StoreCheck::HomeProductList => {
                "Homepage"
            }
            StoreCheck::CatalogItems | StoreCheck::CatalogSortByPrice => "Product Catalog",
            StoreCheck::ProductInformation | StoreCheck::ProductImageAltText => "Product Detail",
            StoreCheck::AboutContent | StoreCheck::AboutFromNavigation => "About Page",
            StoreCheck::PasswordGate => "Password Protection",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            StoreCheck::HomeIntroText => "displays the intro text",
            StoreCheck::HomeBannerImage => "displays the banner image",
            StoreCheck::HomeProductList => "shows a product list or a shop link",
            StoreCheck::CatalogItems => "lists catalog items",
            StoreCheck::CatalogSortByPrice => "sorts products by price",
            StoreCheck::ProductInformation => "shows product information",
            StoreCheck::ProductImageAltText => "product images carry alt text",
            StoreCheck::AboutContent => "displays the about content",
            StoreCheck::AboutFromNavigation => "about page is reachable from navigation",
            StoreCheck::PasswordGate => "passes the password gate",
        }
    }

    async fn prepare(
        &self,
        browser: &mut dyn Browser,
        config: &StorecheckConfig,
    ) -> Result<(), CheckError> {
        pass_gate(browser, config).await.map(|_| ())
    }

    async fn run(
        &self,
        browser: &mut dyn Browser,
        config: &StorecheckConfig,
    ) -> Result<Outcome, CheckError> {
        match self {
            StoreCheck::HomeIntroText => home::intro_text(browser, config).await,
            StoreCheck::HomeBannerImage => home::banner_image(browser, config).await,
            StoreCheck::HomeProductList => home::product_list(browser).await,
            StoreCheck::CatalogItems => catalog::items(browser, config).await,
            StoreCheck::CatalogSortByPrice => catalog::sort_by_price(browser, config).await,
            StoreCheck::ProductInformation => product::information(browser, config).await,
            StoreCheck::ProductImageAltText => product::image_alt_text(browser, config).await,
            StoreCheck::AboutContent => about::content(browser, config).await,
            StoreCheck::AboutFromNavigation => about::from_navigation(browser, config).await,
            StoreCheck::PasswordGate => gate::password_protection(browser, config).await,
        }
    }
}

/// Snapshot the current page and resolve `candidates` with `rule`.
pub(crate) async fn resolve_now(
    browser: &mut dyn Browser,
    candidates: &[&str],
    rule: MatchRule,
) -> Result<Resolution, CheckError> {
    let snapshot = browser.snapshot().await?;
    Ok(resolve_with(candidates, snapshot.as_ref(), rule).await?)
}

pub(crate) async fn goto(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
    path: &str,
) -> Result<(), CheckError> {
    let url = config
        .store
        .page_url(path)
        .map_err(|e| CheckError::Config(format!("cannot build URL for {}: {}", path, e)))?;
    browser.navigate(&url).await?;
    Ok(())
}
