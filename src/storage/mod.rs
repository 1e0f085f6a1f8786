//! Storage abstractions for crawled documents.
//!
//! ## Directory Structure
//!
//! ```text
//! output_markdown/
//! ├── index.md              # Site root
//! ├── guide_intro.md        # /guide/intro
//! ├── guide_install.md      # /guide/install
//! └── crawl-report.json     # Crawl summary (optional)
//! ```

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CrawlReport;

// Re-export for convenience
pub use local::LocalStorage;

/// File name of the crawl summary.
pub const REPORT_FILE: &str = "crawl-report.json";

/// Trait for document storage backends.
///
/// Writes to different names may run concurrently.
#[async_trait]
pub trait DocumentStorage: Send + Sync {
    /// Store `text` under `name`, replacing any previous content.
    ///
    /// Returns where the document ended up.
    async fn save(&self, name: &str, text: &str) -> Result<PathBuf>;

    /// Store the crawl summary.
    async fn write_report(&self, report: &CrawlReport) -> Result<PathBuf>;
}
