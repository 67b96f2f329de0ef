//! Internal utilities

mod env;

pub use env::get_env_with_prefix;
