//! Chromium-backed [`BrowserDriver`] over the DevTools protocol.

mod element;

use std::fmt::Display;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::driver::BrowserDriver;
use crate::error::DriverError;

pub use element::ChromeElement;

/// Interval between readiness checks in [`poll_presence`].
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Browser launch settings.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub headless: bool,
    /// Explicit Chrome/Chromium binary. `None` lets chromiumoxide detect one.
    pub chrome_path: Option<PathBuf>,
    /// Per-CDP-command timeout.
    pub request_timeout: Duration,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            chrome_path: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// One browser process with a single tab, owned for the duration of a run.
///
/// Call [`Self::close`] to shut Chromium down cleanly. If the session is
/// dropped instead (early return, panic), the CDP handler task is aborted
/// and the browser process is killed with it.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    user_data_dir: Option<PathBuf>,
}

impl ChromeSession {
    /// Launches Chromium and opens a blank tab.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Launch`] if the browser cannot be configured,
    /// started, or cannot open a tab.
    pub async fn launch(options: &LaunchOptions) -> Result<Self, DriverError> {
        // A per-process profile avoids the profile lock when two runs overlap.
        let user_data_dir =
            std::env::temp_dir().join(format!("shelfwatch_chrome_{}", std::process::id()));
        std::fs::create_dir_all(&user_data_dir).map_err(|e| {
            DriverError::Launch(format!(
                "cannot create profile dir {}: {e}",
                user_data_dir.display()
            ))
        })?;

        let mut builder = BrowserConfig::builder()
            .request_timeout(options.request_timeout)
            .window_size(1920, 1080)
            .user_data_dir(user_data_dir.clone())
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-notifications")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--mute-audio");

        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &options.chrome_path {
            builder = builder.chrome_executable(path);
        }

        let config = builder.build().map_err(DriverError::Launch)?;

        tracing::info!(headless = options.headless, "launching browser");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    let message = e.to_string();
                    // chromiumoxide cannot decode every CDP event Chrome emits.
                    if message.contains("data did not match any variant")
                        || message.contains("Failed to deserialize WS response")
                    {
                        tracing::trace!(error = %message, "ignored undecodable CDP event");
                    } else {
                        tracing::error!(error = %message, "browser handler error");
                    }
                }
            }
            tracing::debug!("browser handler task completed");
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler.abort();
                return Err(DriverError::Launch(format!("cannot open tab: {e}")));
            }
        };

        tracing::info!("browser started");
        Ok(Self {
            browser,
            page,
            handler,
            user_data_dir: Some(user_data_dir),
        })
    }

    /// Closes the browser, waits for the process to exit, and removes the
    /// temporary profile directory.
    ///
    /// # Errors
    ///
    /// Returns [`DriverError::Browser`] if Chromium does not acknowledge the
    /// close command. The handler task and profile directory are cleaned up
    /// either way.
    pub async fn close(mut self) -> Result<(), DriverError> {
        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| DriverError::Browser(format!("close failed: {e}")));
        if let Err(e) = self.browser.wait().await {
            tracing::warn!(error = %e, "failed waiting for browser process to exit");
        }
        self.handler.abort();
        self.remove_profile_dir();
        if closed.is_ok() {
            tracing::info!("browser closed successfully");
        }
        closed
    }

    fn remove_profile_dir(&mut self) {
        if let Some(path) = self.user_data_dir.take() {
            if let Err(e) = std::fs::remove_dir_all(&path) {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to remove browser profile dir"
                );
            }
        }
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler.abort();
        if self.user_data_dir.is_some() {
            tracing::warn!("browser session dropped without close; removing profile dir");
            self.remove_profile_dir();
        }
    }
}

#[async_trait]
impl BrowserDriver for ChromeSession {
    type Element = ChromeElement;

    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| DriverError::Navigation {
                url: url.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn execute_script(&self, script: &str) -> Result<(), DriverError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| DriverError::Script(e.to_string()))?;
        Ok(())
    }

    async fn wait_for_presence(
        &self,
        selector: &str,
        deadline: Duration,
    ) -> Result<(), DriverError> {
        let page = &self.page;
        poll_presence(selector, deadline, move || async move {
            page.find_elements(selector)
                .await
                .map(|found| !found.is_empty())
        })
        .await
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<ChromeElement>, DriverError> {
        let elements = self
            .page
            .find_elements(selector)
            .await
            .map_err(element::classify)?;
        Ok(elements.into_iter().map(ChromeElement::new).collect())
    }
}

/// Repeats `check` until it reports a match or `deadline` elapses.
///
/// Each check is bounded by the time left, so a CDP call that hangs cannot
/// stretch the wait past `deadline`. Lookup errors while the document is
/// still being replaced are expected and only logged.
async fn poll_presence<F, Fut, E>(
    selector: &str,
    deadline: Duration,
    mut check: F,
) -> Result<(), DriverError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: Display,
{
    let start = Instant::now();
    let timed_out = || DriverError::Timeout {
        selector: selector.to_owned(),
        waited: deadline,
    };

    loop {
        let remaining = deadline.saturating_sub(start.elapsed());
        match tokio::time::timeout(remaining, check()).await {
            Ok(Ok(true)) => {
                tracing::debug!(
                    selector,
                    elapsed_ms = start.elapsed().as_millis(),
                    "selector present"
                );
                return Ok(());
            }
            Ok(Ok(false)) => {}
            Ok(Err(e)) => tracing::trace!(selector, error = %e, "presence check failed"),
            Err(_) => return Err(timed_out()),
        }

        let remaining = deadline.saturating_sub(start.elapsed());
        if remaining.is_zero() {
            return Err(timed_out());
        }
        tokio::time::sleep(POLL_INTERVAL.min(remaining)).await;
    }
}
