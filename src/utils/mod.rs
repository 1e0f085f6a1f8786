//! Utility functions and helpers.

pub mod http;
pub mod url;

pub use self::url::{file_stem, resolve_link};
