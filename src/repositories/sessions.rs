use crate::common::context::Context;
use redis::AsyncCommands;

fn make_session_key(prefix: &str, session_id: &str) -> String {
    format!("{prefix}:{session_id}")
}

/// Removes the stored session record. Returns whether a record existed.
pub async fn delete<C: Context>(ctx: &C, session_id: &str) -> anyhow::Result<bool> {
    let mut redis = ctx.redis().await?;
    let key = make_session_key(ctx.session_key_prefix(), session_id);
    let removed: u64 = redis.del(key).await?;
    Ok(removed > 0)
}
