use anyhow::{Context, Error};
use dotenv::dotenv;
use std::env;
use std::str::FromStr;

pub fn get_env_var(key: &str) -> Result<String, Error> {
    dotenv().ok();
    env::var(key).with_context(|| format!("missing environment variable {key}"))
}

/// Parses an optional value. Unset, blank or unparsable values yield `default`.
pub fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().unwrap_or(default),
        _ => default,
    }
}
