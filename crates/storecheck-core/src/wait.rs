//! Caller-side waiting. The resolver never waits; steps do, through these.

use crate::browser::{Browser, BrowserError};
use crate::resolution::{Resolution, resolve};
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::debug;

/// Fixed pause after navigation so late-rendered markup is present.
pub async fn settle(duration: Duration) {
    if !duration.is_zero() {
        sleep(duration).await;
    }
}

/// Poll the current URL until `predicate` accepts it or `timeout` elapses.
/// Returns the last URL seen.
pub async fn url_until<B, F>(
    browser: &mut B,
    timeout: Duration,
    poll: Duration,
    predicate: F,
) -> Result<String, BrowserError>
where
    B: Browser + ?Sized,
    F: Fn(&str) -> bool,
{
    let deadline = Instant::now() + timeout;
    loop {
        let url = browser.current_url().await?;
        if predicate(&url) || Instant::now() >= deadline {
            return Ok(url);
        }
        sleep(poll).await;
    }
}

/// Re-snapshot and re-resolve until some candidate matches or `timeout`
/// elapses. Stale snapshots are retried; other errors propagate.
pub async fn resolution_until_present<B>(
    browser: &mut B,
    candidates: &[&str],
    timeout: Duration,
    poll: Duration,
) -> Result<Resolution, BrowserError>
where
    B: Browser + ?Sized,
{
    let deadline = Instant::now() + timeout;
    loop {
        let attempt = match browser.snapshot().await {
            Ok(snapshot) => resolve(candidates, snapshot.as_ref(), 1).await,
            Err(BrowserError::Resolution(e)) => Err(e),
            Err(e) => return Err(e),
        };
        match attempt {
            Ok(res) if res.count > 0 => return Ok(res),
            Ok(res) if Instant::now() >= deadline => return Ok(res),
            Ok(_) => {}
            Err(e) if e.is_retryable() && Instant::now() < deadline => {
                debug!("Snapshot went stale while waiting: {}", e);
            }
            Err(e) => return Err(e.into()),
        }
        sleep(poll).await;
    }
}
