//! The Chromium process behind [`HeadlessBrowser`](crate::HeadlessBrowser):
//! launch, the CDP event loop and the browser profile directory.

use chromiumoxide::BrowserConfig as ChromeConfig;
use chromiumoxide::cdp::browser_protocol::page::{
    EventJavascriptDialogOpening, HandleJavaScriptDialogParams,
};
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use storecheck_core::BrowserError;
use storecheck_core::config::BrowserConfig;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Where Chromium keeps its profile for one run.
enum Profile {
    /// Given through `STORECHECK_USER_DATA_DIR`; left in place on close.
    Shared(PathBuf),
    /// Created for this run and removed on close, so no cookie from an
    /// earlier run unlocks the password gate.
    Scratch(PathBuf),
}

impl Profile {
    fn resolve() -> Result<Self, BrowserError> {
        let profile = match std::env::var("STORECHECK_USER_DATA_DIR") {
            Ok(dir) => Profile::Shared(PathBuf::from(dir)),
            Err(_) => {
                let nanos = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_nanos())
                    .unwrap_or_default();
                let name = format!("storecheck-profile-{}-{}", std::process::id(), nanos);
                Profile::Scratch(std::env::temp_dir().join(name))
            }
        };
        std::fs::create_dir_all(profile.path()).map_err(|e| {
            BrowserError::Other(format!(
                "Cannot create profile dir {}: {}",
                profile.path().display(),
                e
            ))
        })?;
        debug!("Chromium profile: {}", profile.path().display());
        Ok(profile)
    }

    fn path(&self) -> &Path {
        match self {
            Profile::Shared(path) | Profile::Scratch(path) => path,
        }
    }

    fn discard(self) {
        if let Profile::Scratch(path) = self
            && let Err(e) = std::fs::remove_dir_all(&path)
        {
            debug!("Profile dir {} left behind: {}", path.display(), e);
        }
    }
}

fn chrome_config(config: &BrowserConfig, profile: &Path) -> Result<ChromeConfig, BrowserError> {
    // Containers and CI runners rarely allow the sandbox
    let mut builder = ChromeConfig::builder().no_sandbox().user_data_dir(profile);
    if config.visible {
        builder = builder.with_head();
    }
    // CHROME_BIN wins over the configured path
    let executable = std::env::var("CHROME_BIN")
        .ok()
        .or_else(|| config.chrome_bin.clone());
    if let Some(executable) = executable {
        info!("Using Chrome binary {}", executable);
        builder = builder.chrome_executable(executable);
    }
    builder
        .build()
        .map_err(|e| BrowserError::Other(format!("Invalid Chromium options: {}", e)))
}

/// Accept every `alert`/`confirm`/`beforeunload` so an open dialog never
/// stalls script evaluation.
async fn accept_dialogs(page: &Page) -> Result<(), BrowserError> {
    let mut dialogs = page
        .event_listener::<EventJavascriptDialogOpening>()
        .await
        .map_err(|e| BrowserError::Other(format!("Cannot watch dialogs: {}", e)))?;

    let page = page.clone();
    tokio::spawn(async move {
        while let Some(dialog) = dialogs.next().await {
            debug!("Accepting {:?} dialog: {}", dialog.r#type, dialog.message);
            if let Err(e) = page.execute(HandleJavaScriptDialogParams::new(true)).await {
                warn!("Dialog stayed open: {}", e);
            }
        }
    });
    Ok(())
}

pub struct CdpClient {
    browser: Browser,
    events: JoinHandle<()>,
    pub(crate) page: Page,
    profile: Profile,
}

impl CdpClient {
    pub async fn launch(config: &BrowserConfig) -> Result<Self, BrowserError> {
        info!(
            "Launching Chromium ({})",
            if config.visible { "visible" } else { "headless" }
        );
        let profile = Profile::resolve()?;
        let (browser, mut handler) = Browser::launch(chrome_config(config, profile.path())?)
            .await
            .map_err(|e| BrowserError::Other(format!("Chromium did not start: {}", e)))?;

        // The connection only makes progress while this loop polls it
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("CDP event error: {}", e);
                }
            }
            debug!("CDP connection closed");
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Other(format!("Cannot open a tab: {}", e)))?;
        accept_dialogs(&page).await?;

        Ok(Self {
            browser,
            events,
            page,
            profile,
        })
    }

    /// Shut Chromium down. The scratch profile is removed even when the
    /// browser refuses to close cleanly.
    pub async fn close(mut self) -> Result<(), BrowserError> {
        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| BrowserError::Other(format!("Chromium did not close: {}", e)));
        if let Err(e) = self.events.await {
            debug!("CDP event loop ended abnormally: {}", e);
        }
        self.profile.discard();
        closed
    }
}
