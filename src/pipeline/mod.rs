//! Pipeline entry points for crawler operations.
//!
//! - `run_crawler`: Crawl a documentation site into Markdown files
//! - `detect_generator`: Probe a single page for its site generator

pub mod crawl;
pub mod frontier;

pub use crawl::{Crawler, detect_generator, resolve_policy, run_crawler};
pub use frontier::Frontier;
