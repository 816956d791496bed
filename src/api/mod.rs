use crate::common::init;
use crate::common::state::AppState;
use crate::settings::AppSettings;
use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

pub mod cas;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cas::sessions::index))
        .route("/users/service", post(cas::sessions::single_sign_out))
        .route(
            "/cas/session_indexes",
            post(cas::sessions::register_session_index),
        )
}

pub async fn serve(settings: &AppSettings) -> anyhow::Result<()> {
    let state = init::initialize_state(settings)?;
    let single_sign_out_enabled = state.single_sign_out.is_enabled();
    let app = router().with_state(state);

    let addr = SocketAddr::new(settings.app_host, settings.app_port);
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        single_sign_out_enabled,
        "Serving cas-session-service"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
