pub mod context;
pub mod env;
pub mod error;
pub mod init;
pub mod redis_pool;
pub mod state;
#[cfg(test)]
pub mod testing;
