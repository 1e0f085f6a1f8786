//! Service layer for the crawler application.
//!
//! This module contains the page-level logic:
//! - Site generator policies (`SitePolicy`, `AstroPolicy`, `VuePressPolicy`)
//! - Generator detection (`GeneratorDetector`)
//! - Content region extraction (`ContentExtractor`)
//! - Same-site link discovery (`LinkDiscoverer`)
//! - HTML to Markdown conversion (`MarkdownConverter`)
//! - Markdown cleanup (`normalize`)

mod convert;
mod detect;
mod extract;
mod links;
pub mod normalize;
mod policy;

pub use convert::{HtmdConverter, MarkdownConverter};
pub use detect::GeneratorDetector;
pub use extract::{ContentExtractor, ContentRegion};
pub use links::LinkDiscoverer;
pub use normalize::{normalize, with_source_header};
pub use policy::{AstroPolicy, SitePolicy, VuePressPolicy, policy_for};
