use crate::common::context::Context;
use redis::AsyncCommands;

fn make_index_key(session_index: &str) -> String {
    format!("cas:session_indexes:{session_index}")
}

pub async fn create<C: Context>(ctx: &C, session_index: &str, session_id: &str) -> anyhow::Result<()> {
    let mut redis = ctx.redis().await?;
    let key = make_index_key(session_index);
    let ttl_secs = ctx.session_index_ttl().as_secs().max(1);
    let _: () = redis.set_ex(key, session_id, ttl_secs).await?;
    Ok(())
}

pub async fn fetch_session_id<C: Context>(
    ctx: &C,
    session_index: &str,
) -> anyhow::Result<Option<String>> {
    let mut redis = ctx.redis().await?;
    let key = make_index_key(session_index);
    let session_id: Option<String> = redis.get(key).await?;
    Ok(session_id)
}

pub async fn delete<C: Context>(ctx: &C, session_index: &str) -> anyhow::Result<()> {
    let mut redis = ctx.redis().await?;
    let key = make_index_key(session_index);
    let _: u64 = redis.del(key).await?;
    Ok(())
}
