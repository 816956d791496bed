use crate::usecases::single_sign_out::{SessionIndexStore, SingleSignOutHandler};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub single_sign_out: Arc<SingleSignOutHandler>,
    pub session_indexes: Arc<dyn SessionIndexStore>,
}
