use std::sync::Arc;

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::StreamExt;
use tracing::info;

use crate::classifier::Classify;
use crate::error::PredictError;
use crate::models::{PredictionRecord, PredictionResponse};
use crate::policy;
use crate::preprocess;
use crate::store::PredictionStore;

/// Maximum accepted image size in bytes. Enforced while the multipart body
/// streams in, before any pipeline stage runs.
pub const MAX_PAYLOAD_BYTES: usize = 1_000_000;

/// Required multipart field carrying the image file.
pub const IMAGE_FIELD: &str = "image";

/// Dependencies shared by all in-flight requests. The classifier is loaded
/// once at startup and never mutated afterwards.
pub struct AppState {
    pub classifier: Arc<dyn Classify>,
    pub store: Arc<dyn PredictionStore>,
}

pub async fn predict(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, PredictError> {
    let image = read_image_field(&mut payload).await?;

    // Decode and inference are CPU-bound; keep them off the event loop.
    let classifier = Arc::clone(&state.classifier);
    let classification = web::block(move || {
        let tensor = preprocess::decode_to_tensor(&image)?;
        classifier.classify(tensor)
    })
    .await
    .map_err(|e| PredictError::Blocking(e.to_string()))??;

    let record = PredictionRecord::new(
        classification.label,
        policy::suggestion_for(classification.label),
    );
    state.store.save(&record).await?;

    info!(
        id = %record.id,
        result = %record.result,
        confidence = classification.confidence_score,
        "prediction stored"
    );

    Ok(HttpResponse::Created().json(PredictionResponse {
        status: "success",
        message: policy::message_for(classification.confidence_score),
        data: record,
    }))
}

/// Collect the bytes of the `image` field, rejecting the request as soon as
/// the accumulated size passes [`MAX_PAYLOAD_BYTES`].
async fn read_image_field(payload: &mut Multipart) -> Result<web::Bytes, PredictError> {
    let mut image = web::BytesMut::new();
    let mut found = false;

    while let Some(item) = payload.next().await {
        let mut field = item?;
        if field.content_disposition().get_name() != Some(IMAGE_FIELD) {
            continue;
        }
        found = true;

        while let Some(chunk) = field.next().await {
            let chunk = chunk?;
            if image.len() + chunk.len() > MAX_PAYLOAD_BYTES {
                return Err(PredictError::PayloadTooLarge);
            }
            image.extend_from_slice(&chunk);
        }
    }

    if !found || image.is_empty() {
        return Err(PredictError::MissingImage);
    }
    Ok(image.freeze())
}
