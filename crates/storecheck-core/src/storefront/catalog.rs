use super::selectors::{
    BODY, CATALOG_PRODUCTS, PRODUCT_LINKS, SORT_CONTROLS, SORT_PRICE_ASCENDING,
};
use super::{goto, resolve_now};
use crate::browser::Browser;
use crate::config::StorecheckConfig;
use crate::expect;
use crate::resolution::{MatchRule, resolve};
use crate::suite::{CheckError, Outcome};
use crate::wait;
use tracing::{info, warn};

pub(super) const CATALOG_PATH: &str = "/collections/all";

pub(super) async fn items(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<Outcome, CheckError> {
    goto(&mut *browser, config, CATALOG_PATH).await?;
    wait::settle(config.timing.catalog_settle()).await;

    // Every query below reads the same page, so one snapshot serves them all.
    let snapshot = browser.snapshot().await?;
    let products = resolve(CATALOG_PRODUCTS, snapshot.as_ref(), 1).await?;
    match products.selector() {
        Some(selector) => info!(selector, count = products.count, "Catalog products found"),
        None => {
            let links = resolve(&[PRODUCT_LINKS], snapshot.as_ref(), 1).await?;
            expect::present(&links, "product links in catalog")?;
        }
    }

    let body = resolve(&[BODY], snapshot.as_ref(), 1).await?;
    expect::text_contains_any(&body, &config.content.product_keywords, "catalog product names")?;
    Ok(Outcome::Passed)
}

/// Themes without a sort control skip this case instead of failing it.
pub(super) async fn sort_by_price(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<Outcome, CheckError> {
    goto(&mut *browser, config, CATALOG_PATH).await?;
    wait::settle(config.timing.catalog_settle()).await;

    // A candidate matching several controls is ambiguous; move on to the next.
    let control = resolve_now(&mut *browser, SORT_CONTROLS, MatchRule::Exactly(1)).await?;
    let Some(selector) = control.selector() else {
        warn!("No sorting control found, the theme may have it disabled");
        return Ok(Outcome::Skipped(
            "no sorting control found in this theme".to_string(),
        ));
    };

    browser
        .select_option(selector, 0, SORT_PRICE_ASCENDING)
        .await?;
    let expected = format!("sort_by={}", SORT_PRICE_ASCENDING);
    let url = wait::url_until(
        &mut *browser,
        config.timing.settle(),
        config.timing.poll_interval(),
        |u| u.contains(&expected),
    )
    .await?;
    expect::url_contains(&url, &expected, "sorted catalog URL")?;
    Ok(Outcome::Passed)
}
