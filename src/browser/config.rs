use std::path::PathBuf;

/// Options for launching the browser that renders snapshots
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Run the browser in headless mode
    pub headless: bool,

    /// Viewport width in pixels
    pub window_width: u32,

    /// Viewport height in pixels
    pub window_height: u32,

    /// Path to the Chrome/Chromium binary (auto-detected if None)
    pub chrome_path: Option<PathBuf>,

    /// Enable the Chrome sandbox
    pub sandbox: bool,
}

impl LaunchOptions {
    /// Create launch options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set the viewport size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Builder method: set the Chrome binary path
    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Builder method: set sandbox mode
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 800,
            chrome_path: None,
            sandbox: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_builder() {
        let opts = LaunchOptions::new().headless(false).window_size(800, 600);

        assert!(!opts.headless);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
        assert!(opts.sandbox);
    }

    #[test]
    fn test_launch_options_defaults() {
        let opts = LaunchOptions::default();

        assert!(opts.headless);
        assert_eq!(opts.window_width, 1280);
        assert!(opts.chrome_path.is_none());
    }
}
