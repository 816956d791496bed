use crate::common::error::{AppError, ServiceResult};
use crate::usecases::single_sign_out::SessionIndexStore;
use tracing::debug;

/// Records which local session a CAS login created, so a later
/// single-sign-out notification for `session_index` can find it.
pub async fn register(
    store: &dyn SessionIndexStore,
    session_index: &str,
    session_id: &str,
) -> ServiceResult<()> {
    let session_index = session_index.trim();
    if session_index.is_empty() {
        return Err(AppError::SessionIndexesInvalidIndex);
    }
    let session_id = session_id.trim();
    if session_id.is_empty() {
        return Err(AppError::SessionIndexesInvalidSessionId);
    }

    store.store_session_index(session_index, session_id).await?;
    debug!(session_index, session_id, "Recorded CAS session index");
    Ok(())
}
