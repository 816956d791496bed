use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterSessionIndexArgs {
    pub session_index: String,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterSessionIndexResponse {
    pub session_index: String,
    pub session_id: String,
}
