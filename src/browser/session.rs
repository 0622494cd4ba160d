use crate::browser::config::LaunchOptions;
use crate::error::{PerturbError, Result};
use crate::scene::extract::PageSnapshot;
use headless_chrome::{Browser, Tab};
use std::ffi::OsStr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// A browser session scoped to rendering page snapshots.
///
/// The session owns the underlying Chrome instance; dropping it tears the
/// browser down on every exit path, including panics during traversal. Each
/// scene analysis should own its own session, so parallel analyses never
/// share rendering state.
pub struct SnapshotSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// The tab used for snapshot rendering
    tab: Arc<Tab>,
}

impl SnapshotSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Raise the idle timeout (default is 30 seconds) so long traversals
        // don't lose the browser mid-scene
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 10);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        let browser = Browser::new(launch_opts).map_err(|e| PerturbError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| PerturbError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tab })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Load a file-backed page snapshot (e.g. an MHTML capture) into the tab.
    ///
    /// A failure here is fatal for the scene and is propagated to the caller.
    pub fn load_snapshot(&self, snapshot: &Path) -> Result<()> {
        let resolved = snapshot.canonicalize().map_err(|e| PerturbError::SnapshotLoadFailed {
            path: snapshot.display().to_string(),
            reason: e.to_string(),
        })?;

        let url = format!("file://{}", resolved.display());
        self.navigate(&url)
    }

    /// Navigate the tab to a URL and wait for the page to settle
    pub fn navigate(&self, url: &str) -> Result<()> {
        log::debug!("Loading page: {}", url);

        self.tab
            .navigate_to(url)
            .map_err(|e| PerturbError::SnapshotLoadFailed { path: url.to_string(), reason: e.to_string() })?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| PerturbError::SnapshotLoadFailed {
                path: url.to_string(),
                reason: format!("Navigation timeout: {}", e),
            })?;

        Ok(())
    }

    /// Collect raw node records from the rendered page.
    ///
    /// Runs a single script over every descendant of the document body. A
    /// node that fails evaluation (detached mid-walk, style lookup error) is
    /// skipped inside the script; only a failure of the evaluation itself is
    /// reported.
    pub fn collect_page(&self) -> Result<PageSnapshot> {
        let js_code = include_str!("extract_elements.js");

        let result = self
            .tab
            .evaluate(js_code, false)
            .map_err(|e| PerturbError::ExtractionFailed(format!("Element walk failed: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| PerturbError::ExtractionFailed("No value returned from element walk".to_string()))?;

        // The script returns a JSON string, so unwrap the string first
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| PerturbError::ExtractionFailed(format!("Failed to get JSON string: {}", e)))?;

        let page: PageSnapshot = serde_json::from_str(&json_str)
            .map_err(|e| PerturbError::ExtractionFailed(format!("Failed to parse node records: {}", e)))?;

        log::debug!(
            "Collected {} raw nodes (viewport {}x{})",
            page.nodes.len(),
            page.viewport.width,
            page.viewport.height
        );

        Ok(page)
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Close the session's tabs. The browser process itself shuts down when
    /// the session is dropped.
    pub fn close(&self) -> Result<()> {
        let _ = self.tab.close(false);
        Ok(())
    }
}
