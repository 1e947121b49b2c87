pub mod auth;
pub mod constants;
pub mod get_env;
