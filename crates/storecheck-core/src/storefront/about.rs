use super::selectors::{ABOUT_LINK, ABOUT_PATH, BODY, MENU_TOGGLE, NAV_LINKS};
use super::{goto, resolve_now};
use crate::browser::Browser;
use crate::config::StorecheckConfig;
use crate::expect;
use crate::resolution::MatchRule;
use crate::suite::{CheckError, Outcome};
use crate::wait;
use tracing::debug;

pub(super) async fn content(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<Outcome, CheckError> {
    goto(&mut *browser, config, ABOUT_PATH).await?;
    wait::settle(config.timing.settle()).await;

    let body = resolve_now(browser, &[BODY], MatchRule::AtLeast(1)).await?;
    for phrase in &config.content.about_phrases {
        expect::text_visible(&body, phrase, "about page copy")?;
    }
    Ok(Outcome::Passed)
}

/// Desktop headers show the link directly; mobile layouts hide it in a drawer.
pub(super) async fn from_navigation(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<Outcome, CheckError> {
    browser.navigate(&config.store.base_url).await?;
    wait::settle(config.timing.settle()).await;

    let nav = resolve_now(&mut *browser, &[NAV_LINKS], MatchRule::AtLeast(1)).await?;
    let desktop_link = nav
        .visible()
        .find(|el| el.text_contains_ignore_case("about"))
        .map(|el| el.index);

    match desktop_link {
        Some(index) => {
            debug!(index, "Clicking About link in header navigation");
            browser.click(NAV_LINKS, index).await?;
        }
        None => {
            debug!("No visible About link, opening the menu drawer");
            let toggle = resolve_now(&mut *browser, &[MENU_TOGGLE], MatchRule::AtLeast(1)).await?;
            expect::present(&toggle, "menu drawer toggle")?;
            browser.click(MENU_TOGGLE, 0).await?;
            wait::settle(config.timing.drawer_settle()).await;

            let link = resolve_now(&mut *browser, &[ABOUT_LINK], MatchRule::AtLeast(1)).await?;
            expect::present(&link, "about link in drawer")?;
            browser.click(ABOUT_LINK, 0).await?;
        }
    }

    let url = wait::url_until(
        &mut *browser,
        config.timing.gate_timeout(),
        config.timing.poll_interval(),
        |u| u.contains(ABOUT_PATH),
    )
    .await?;
    expect::url_contains(&url, ABOUT_PATH, "about page URL")?;
    Ok(Outcome::Passed)
}
