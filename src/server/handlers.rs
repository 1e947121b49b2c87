use crate::core::imagga::{RecognitionResult, TaggingError};
use crate::core::staging::StagedUpload;
use crate::server::error::RecognitionError;
use crate::server::types::{AppState, TagNamesResponse};
use crate::utils::constants::IMAGE_FIELD;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

// server status handler
pub async fn server_status_handler() -> Json<Value> {
    Json(json!({"status": "running"}))
}

// relays the tagging service's answer for one uploaded image
pub async fn recognize_image_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<RecognitionResult, RecognitionError> {
    let upload = stage_image(&state, multipart).await?;
    let result = tag_upload(&state, &upload).await?;
    drop(upload);

    debug!(size = result.as_bytes().len(), "relaying tagging result");
    Ok(result)
}

// same lifecycle, answers with the confident tag names only
pub async fn recognize_image_tags_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TagNamesResponse>, RecognitionError> {
    let upload = stage_image(&state, multipart).await?;
    let result = tag_upload(&state, &upload).await?;
    drop(upload);

    let tags = result.tags().map_err(TaggingError::from)?;
    Ok(Json(TagNamesResponse {
        tags: tags.confident_tag_names(state.min_confidence),
    }))
}

/// Stages the first file part named `image`. Parts without a file name are
/// form values, not files, and are skipped like any other field.
async fn stage_image(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<StagedUpload, RecognitionError> {
    let mut multipart = multipart.map_err(|e| {
        warn!(error = %e, "request is not a multipart upload");
        RecognitionError::NoFile
    })?;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(RecognitionError::NoFile),
            Err(e) => {
                warn!(error = %e, "multipart body rejected");
                return Err(RecognitionError::NoFile);
            }
        };

        debug!(
            field = ?field.name(),
            file_name = ?field.file_name(),
            content_type = ?field.content_type(),
            "multipart field"
        );

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let bytes = field.bytes().await.map_err(|e| {
            warn!(error = %e, "failed to read image field");
            RecognitionError::NoFile
        })?;

        let upload =
            StagedUpload::write(&state.upload_dir, IMAGE_FIELD, Some(file_name), bytes).await?;
        return Ok(upload);
    }
}

async fn tag_upload(
    state: &AppState,
    upload: &StagedUpload,
) -> Result<RecognitionResult, RecognitionError> {
    let image = upload.read().await?;
    let file_name = upload.file_name().unwrap_or(IMAGE_FIELD);
    debug!(path = %upload.path().display(), size = image.len(), "forwarding staged upload");

    Ok(state.imagga.tag(image, file_name).await?)
}
