//! Snapshot rendering module
//!
//! Provides the browser session used to render captured page snapshots and
//! collect raw node records for scene analysis:
//! - LaunchOptions: browser launch configuration
//! - SnapshotSession: scoped Chrome session with guaranteed teardown

pub mod config;
pub mod session;

pub use config::LaunchOptions;
pub use session::SnapshotSession;
