use crate::common::error::ServiceResult;
use crate::common::state::AppState;
use crate::models::session_indexes::{RegisterSessionIndexArgs, RegisterSessionIndexResponse};
use crate::models::single_sign_out::{Acknowledgement, LogoutNotification};
use crate::usecases::session_indexes;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

/// CAS server callback for single sign-out. Always acknowledged.
pub async fn single_sign_out(
    State(state): State<AppState>,
    notification: LogoutNotification,
) -> Acknowledgement {
    state.single_sign_out.handle(&notification).await
}

/// Called by the web application after a CAS login to record which local
/// session belongs to the CAS session index.
pub async fn register_session_index(
    State(state): State<AppState>,
    Json(args): Json<RegisterSessionIndexArgs>,
) -> ServiceResult<(StatusCode, Json<RegisterSessionIndexResponse>)> {
    let session_index = args.session_index.trim().to_owned();
    let session_id = args.session_id.trim().to_owned();
    session_indexes::register(state.session_indexes.as_ref(), &session_index, &session_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterSessionIndexResponse {
            session_index,
            session_id,
        }),
    ))
}

pub async fn index() -> &'static str {
    "Running cas-session-service v0.1"
}
