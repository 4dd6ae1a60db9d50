//! Leadscout Search - Web Research Capability
//!
//! This crate wraps the external search service used for attendee
//! discovery and company research:
//! - `SearchProvider`: trait the pipeline depends on
//! - `LinkupClient`: HTTP implementation
//! - `SearchQuery`: request builder (depth, output type, domain filters)
//! - Response helpers for answers and cited sources

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod linkup;
pub mod provider;
pub mod query;
pub mod response;

pub use error::{Error, Result};
pub use linkup::{LinkupClient, LinkupConfig};
pub use provider::SearchProvider;
pub use query::{OutputType, SearchDepth, SearchQuery};
pub use response::{answer_text, sources, Source};
