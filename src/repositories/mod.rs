pub mod session_indexes;
pub mod sessions;
