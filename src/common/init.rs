use crate::common::context::StoreContext;
use crate::common::redis_pool::{self, RedisPool};
use crate::common::state::AppState;
use crate::settings::AppSettings;
use crate::usecases::single_sign_out::{SingleSignOutConfig, SingleSignOutHandler};
use redis::Commands;
use std::sync::Arc;

pub fn initialize_logging(settings: &AppSettings) {
    tracing_subscriber::fmt()
        .with_max_level(settings.level)
        .with_timer(tracing_subscriber::fmt::time())
        .with_level(true)
        .compact()
        .init();
}

pub fn initialize_state(settings: &AppSettings) -> anyhow::Result<AppState> {
    let redis = initialize_redis(settings)?;
    let stores = Arc::new(StoreContext {
        redis,
        session_key_prefix: settings.session_key_prefix.clone(),
        session_index_ttl: settings.session_index_ttl,
    });
    let config = SingleSignOutConfig {
        enabled: settings.cas_enable_single_sign_out,
    };
    let single_sign_out = SingleSignOutHandler::new(config, stores.clone(), stores.clone());
    Ok(AppState {
        single_sign_out: Arc::new(single_sign_out),
        session_indexes: stores,
    })
}

pub fn initialize_redis(settings: &AppSettings) -> anyhow::Result<RedisPool> {
    let redis_client = redis::Client::open(settings.redis_url.as_str())?;
    let mut conn = redis_client.get_connection_with_timeout(settings.redis_wait_timeout)?;
    let _: () = conn.ping()?;
    redis_pool::build(redis_client, settings)
}
