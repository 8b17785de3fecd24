use super::catalog::CATALOG_PATH;
use super::selectors::{PRODUCT_IMAGE, PRODUCT_LINKS, PRODUCT_PRICE, PRODUCT_TITLE};
use super::{goto, resolve_now};
use crate::browser::Browser;
use crate::config::StorecheckConfig;
use crate::expect;
use crate::resolution::{MatchRule, resolve};
use crate::suite::{CheckError, Outcome};
use crate::wait;

/// Open the catalog and follow the first visible product link.
async fn open_first_product(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<(), CheckError> {
    goto(&mut *browser, config, CATALOG_PATH).await?;
    wait::settle(config.timing.catalog_settle()).await;

    let links = resolve_now(&mut *browser, &[PRODUCT_LINKS], MatchRule::AtLeast(1)).await?;
    let link = expect::visible(&links, "visible product link")?;
    browser.click(PRODUCT_LINKS, link.index).await?;

    let url = wait::url_until(
        &mut *browser,
        config.timing.gate_timeout(),
        config.timing.poll_interval(),
        |u| u.contains("/products/"),
    )
    .await?;
    expect::url_contains(&url, "/products/", "product page URL")?;
    wait::settle(config.timing.settle()).await;
    Ok(())
}

pub(super) async fn information(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<Outcome, CheckError> {
    open_first_product(&mut *browser, config).await?;

    let snapshot = browser.snapshot().await?;
    let title = resolve(&[PRODUCT_TITLE], snapshot.as_ref(), 1).await?;
    expect::visible(&title, "product title")?;
    let price = resolve(&[PRODUCT_PRICE], snapshot.as_ref(), 1).await?;
    expect::visible(&price, "product price")?;
    let images = resolve(&[PRODUCT_IMAGE], snapshot.as_ref(), 1).await?;
    expect::attr_not_empty(&images, "src", "product image")?;
    Ok(Outcome::Passed)
}

/// Alt text may be empty; it only has to be present.
pub(super) async fn image_alt_text(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<Outcome, CheckError> {
    open_first_product(&mut *browser, config).await?;

    let images = resolve_now(browser, &[PRODUCT_IMAGE], MatchRule::AtLeast(1)).await?;
    expect::has_attr(&images, "alt", "product image")?;
    Ok(Outcome::Passed)
}
