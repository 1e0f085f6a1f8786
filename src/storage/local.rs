//! Local filesystem storage implementation.
//!
//! ## Storage Layout
//!
//! ```text
//! {root}/
//! ├── {page}.md             # One Markdown file per crawled page
//! └── crawl-report.json     # Crawl summary
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::CrawlReport;
use crate::storage::{DocumentStorage, REPORT_FILE};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    ///
    /// The directory is created on the first write.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a file name, refusing anything that would
    /// escape the root directory.
    fn path(&self, name: &str) -> Result<PathBuf> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\']);
        if invalid {
            return Err(AppError::validation(format!(
                "invalid output file name {name:?}"
            )));
        }
        Ok(self.root_dir.join(name))
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(name)?;
        tokio::fs::create_dir_all(&self.root_dir).await?;

        let tmp = self.root_dir.join(format!("{name}.tmp"));
        let written = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.flush().await?;
            drop(file);
            tokio::fs::rename(&tmp, &path).await
        }
        .await;

        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                log::debug!("Could not remove {}: {}", tmp.display(), cleanup);
            }
            return Err(e.into());
        }
        Ok(path)
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(name, &bytes).await
    }
}

#[async_trait]
impl DocumentStorage for LocalStorage {
    async fn save(&self, name: &str, text: &str) -> Result<PathBuf> {
        let path = self.write_bytes(name, text.as_bytes()).await?;
        log::debug!("Saved {}", path.display());
        Ok(path)
    }

    async fn write_report(&self, report: &CrawlReport) -> Result<PathBuf> {
        self.write_json(REPORT_FILE, report).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Identifier;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_creates_directory() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nested/out"));

        let path = storage.save("index.md", "# Hello").await.unwrap();
        assert_eq!(path, tmp.path().join("nested/out/index.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Hello");
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.save("page.md", "old").await.unwrap();
        let path = storage.save("page.md", "new").await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "new");
        assert!(!tmp.path().join("page.md.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_keeps_unicode() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        let path = storage.save("zh.md", "快速开始 ✓").await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "快速开始 ✓");
    }

    #[tokio::test]
    async fn test_rejects_escaping_names() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(storage.save("../evil.md", "x").await.is_err());
        assert!(storage.save("a/b.md", "x").await.is_err());
        assert!(storage.save("", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_temp_file() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        // A directory in the way makes the final rename fail.
        std::fs::create_dir(tmp.path().join("page.md")).unwrap();

        assert!(storage.save("page.md", "text").await.is_err());
        assert!(!tmp.path().join("page.md.tmp").exists());
        assert!(tmp.path().join("page.md").is_dir());
    }

    #[tokio::test]
    async fn test_write_report() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let root = Identifier::parse("https://docs.example.com/").unwrap();
        let mut report = CrawlReport::new(root, "astro");
        report.finish();

        let path = storage.write_report(&report).await.unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["root"], "https://docs.example.com/");
        assert_eq!(json["success"], true);
    }
}
