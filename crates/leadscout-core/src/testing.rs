//! Shared test doubles

use async_trait::async_trait;
use leadscout_search::{SearchProvider, SearchQuery};
use mockall::mock;
use serde_json::Value;

mock! {
    pub Search {}

    #[async_trait]
    impl SearchProvider for Search {
        fn name(&self) -> &str;
        async fn search(&self, query: SearchQuery) -> leadscout_search::Result<Value>;
    }
}
