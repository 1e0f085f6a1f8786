// src/models/mod.rs

//! Domain models for the documentation crawler.

mod config;
mod identifier;
mod page;

pub use config::{Config, CrawlerConfig, OutputConfig, SiteConfig, SiteKind};
pub use identifier::Identifier;
pub use page::{
    CrawlReport, FailureStage, FetchedPage, PageDocument, PageFailure, SavedDocument,
};
