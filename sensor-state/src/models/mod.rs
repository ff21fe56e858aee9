pub mod config;
pub mod errors;
pub(crate) mod shutdown;
