//! Storefront password gate.

use super::resolve_now;
use super::selectors::{GATE_SUBMIT, MAIN_CONTENT, PASSWORD_INPUT, PASSWORD_PATH};
use crate::browser::Browser;
use crate::config::StorecheckConfig;
use crate::expect;
use crate::resolution::MatchRule;
use crate::suite::{CheckError, Outcome};
use crate::wait;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// The store did not redirect to the gate.
    Open,
    /// The gate was shown and the credential was accepted.
    Passed,
}

/// Visit the store and get past the password page if it is shown.
pub async fn pass_gate(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<GateStatus, CheckError> {
    let timing = &config.timing;
    browser.navigate(&config.store.base_url).await?;

    let url = browser.current_url().await?;
    if !url.contains(PASSWORD_PATH) {
        return Ok(GateStatus::Open);
    }

    let password = config.store.password.as_deref().ok_or_else(|| {
        CheckError::Config(
            "store is password protected but no gate credential is configured \
             (set STORECHECK_PASSWORD)"
                .to_string(),
        )
    })?;

    info!("Store is gated, submitting credential");
    let input = wait::resolution_until_present(
        &mut *browser,
        &[PASSWORD_INPUT],
        timing.gate_timeout(),
        timing.poll_interval(),
    )
    .await?;
    let field = expect::visible(&input, "password input")?;
    browser.type_text(PASSWORD_INPUT, field.index, password).await?;

    let submit = resolve_now(&mut *browser, &[GATE_SUBMIT], MatchRule::AtLeast(1)).await?;
    expect::present(&submit, "gate submit button")?;
    let button = submit.first_visible().or(submit.first()).map_or(0, |el| el.index);
    browser.click(GATE_SUBMIT, button).await?;

    let url = wait::url_until(
        &mut *browser,
        timing.gate_timeout(),
        timing.poll_interval(),
        |u| !u.contains(PASSWORD_PATH),
    )
    .await?;
    expect::url_not_contains(&url, PASSWORD_PATH, "redirect after password")?;

    wait::settle(timing.settle()).await;
    Ok(GateStatus::Passed)
}

/// Fresh session: cookies cleared, gate passed again, content shown.
pub(super) async fn password_protection(
    browser: &mut dyn Browser,
    config: &StorecheckConfig,
) -> Result<Outcome, CheckError> {
    browser.clear_cookies().await?;
    let status = pass_gate(&mut *browser, config).await?;
    info!(?status, "Gate check finished");

    let main = resolve_now(browser, &[MAIN_CONTENT], MatchRule::AtLeast(1)).await?;
    expect::visible(&main, "main content")?;
    Ok(Outcome::Passed)
}
