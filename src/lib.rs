// src/lib.rs

//! doccrawl: documentation site crawler and Markdown exporter.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
