use crate::common::redis_pool::{PoolResult, RedisPool};
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Context: Sync + Send {
    async fn redis(&self) -> PoolResult;

    /// Prefix under which the web application keeps its session records.
    fn session_key_prefix(&self) -> &str;

    /// Lifetime of a CAS session index mapping.
    fn session_index_ttl(&self) -> Duration;
}

/// Redis access shared by the session index store and the session destroyer.
#[derive(Clone)]
pub struct StoreContext {
    pub redis: RedisPool,
    pub session_key_prefix: String,
    pub session_index_ttl: Duration,
}

#[async_trait]
impl Context for StoreContext {
    async fn redis(&self) -> PoolResult {
        self.redis.get().await
    }

    fn session_key_prefix(&self) -> &str {
        &self.session_key_prefix
    }

    fn session_index_ttl(&self) -> Duration {
        self.session_index_ttl
    }
}
