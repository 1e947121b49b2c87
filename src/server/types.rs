use crate::core::imagga::{ImaggaClient, RecognitionResult};
use crate::utils::auth::Credentials;
use crate::utils::constants::{
    DEFAULT_MIN_CONFIDENCE, DEFAULT_PORT, DEFAULT_UPLOAD_DIR, IMAGGA_TAGS_URL,
    SERVER_REQUEST_BODY_LIMIT,
};
use crate::utils::get_env::{get_env_var, parse_or};
use anyhow::Context;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Process configuration, read once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub credentials: Credentials,
    pub port: u16,
    pub imagga_url: String,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub min_confidence: f64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| get_env_var(key).ok())
    }

    /// Builds the configuration from any key lookup, `from_env` passes the
    /// process environment (with `.env` loaded).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let required = |key: &str| {
            lookup(key).with_context(|| format!("missing environment variable {key}"))
        };
        let api_key = required("IMAGGA_API_KEY")?;
        let api_secret = required("IMAGGA_API_SECRET")?;

        Ok(Self {
            credentials: Credentials::new(api_key, api_secret),
            port: parse_or(lookup("PORT"), DEFAULT_PORT),
            imagga_url: parse_or(lookup("IMAGGA_API_URL"), IMAGGA_TAGS_URL.to_string()),
            upload_dir: PathBuf::from(parse_or(
                lookup("UPLOAD_DIR"),
                DEFAULT_UPLOAD_DIR.to_string(),
            )),
            max_upload_bytes: parse_or(lookup("MAX_UPLOAD_BYTES"), SERVER_REQUEST_BODY_LIMIT),
            min_confidence: parse_or(lookup("MIN_CONFIDENCE"), DEFAULT_MIN_CONFIDENCE),
        })
    }
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub imagga: ImaggaClient,
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub min_confidence: f64,
}

impl AppState {
    pub fn new(config: &Config, http_client: Client) -> Self {
        Self {
            imagga: ImaggaClient::new(
                http_client,
                config.imagga_url.clone(),
                config.credentials.clone(),
            ),
            upload_dir: config.upload_dir.clone(),
            max_upload_bytes: config.max_upload_bytes,
            min_confidence: config.min_confidence,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TagNamesResponse {
    pub tags: Vec<String>,
}

// relayed as-is, no re-serialization
impl IntoResponse for RecognitionResult {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, "application/json")], self.into_bytes()).into_response()
    }
}
