use crate::utils::auth::Credentials;
use crate::utils::constants::IMAGE_FIELD;
use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::IgnoredAny;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaggingError {
    #[error("request to tagging service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("tagging service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("tagging service returned a malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Raw JSON body returned by the tagging service, kept byte for byte.
#[derive(Debug, Clone)]
pub struct RecognitionResult(Bytes);

impl RecognitionResult {
    pub fn from_body(body: Bytes) -> Result<Self, serde_json::Error> {
        serde_json::from_slice::<IgnoredAny>(&body)?;
        Ok(Self(body))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn tags(&self) -> Result<TagsResponse, serde_json::Error> {
        serde_json::from_slice(&self.0)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct TagsResponse {
    pub result: TagsResult,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TagsResult {
    pub tags: Vec<TagEntry>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TagEntry {
    pub confidence: f64,
    pub tag: TagName,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TagName {
    pub en: String,
}

impl TagsResponse {
    /// English names of the tags at or above `min_confidence`, in service order.
    pub fn confident_tag_names(&self, min_confidence: f64) -> Vec<String> {
        self.result
            .tags
            .iter()
            .filter(|entry| entry.confidence >= min_confidence)
            .map(|entry| entry.tag.en.clone())
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct ImaggaClient {
    http_client: Client,
    endpoint: String,
    credentials: Credentials,
}

impl ImaggaClient {
    pub fn new(http_client: Client, endpoint: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            credentials,
        }
    }

    /// Submits one image and returns the service's JSON body untouched.
    pub async fn tag(
        &self,
        image: Vec<u8>,
        file_name: &str,
    ) -> Result<RecognitionResult, TaggingError> {
        let part = Part::bytes(image).file_name(file_name.to_string());
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(AUTHORIZATION, self.credentials.authorization_header())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TaggingError::Status { status, body });
        }

        let body = response.bytes().await?;
        Ok(RecognitionResult::from_body(body)?)
    }
}
