//! Search provider trait

use crate::error::Result;
use crate::query::SearchQuery;

/// An opaque web research service.
///
/// Responses are returned untyped: the service's wire format varies by
/// output type and version, and callers pick out what they need.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for logs
    fn name(&self) -> &str;

    /// Run a query and return the raw JSON response
    async fn search(&self, query: SearchQuery) -> Result<serde_json::Value>;
}
