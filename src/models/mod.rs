pub mod session_indexes;
pub mod single_sign_out;
