use super::resolve_now;
use super::selectors::{BODY, HOME_PRODUCTS, SHOP_LINKS, banner_selector};
use crate::browser::Browser;
use crate::config::StorecheckConfig;
use crate::expect;
use crate::resolution::MatchRule;
use crate::suite::{CheckError, Outcome};
use tracing::info;

pub(super) async fn intro_text(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<Outcome, CheckError> {
    let body = resolve_now(browser, &[BODY], MatchRule::AtLeast(1)).await?;
    expect::text_visible(&body, &config.content.intro_text, "homepage intro")?;
    Ok(Outcome::Passed)
}

pub(super) async fn banner_image(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<Outcome, CheckError> {
    let selector = banner_selector(&config.content.brand);
    let banner = resolve_now(browser, &[selector.as_str()], MatchRule::AtLeast(1)).await?;
    // The image on screen must be the one with a source.
    let shown = expect::visible(&banner, "banner image")?;
    expect::element_attr_not_empty(shown, "src", "banner image")?;
    Ok(Outcome::Passed)
}

/// Themes that do not list products on the homepage must at least link to them.
pub(super) async fn product_list(browser: &mut dyn Browser) -> Result<Outcome, CheckError> {
    let products = resolve_now(&mut *browser, HOME_PRODUCTS, MatchRule::AtLeast(1)).await?;
    if let Some(selector) = products.selector() {
        info!(selector, count = products.count, "Homepage lists products");
        return Ok(Outcome::Passed);
    }

    let links = resolve_now(browser, &[SHOP_LINKS], MatchRule::AtLeast(1)).await?;
    expect::present(&links, "link to collections or products")?;
    Ok(Outcome::Passed)
}
