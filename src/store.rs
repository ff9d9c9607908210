//! Persistence adapter: write-once upsert of prediction documents into an
//! external HTTP document store, keyed by the record id.

use async_trait::async_trait;

use crate::error::PredictError;
use crate::models::PredictionRecord;

/// Logical collection holding prediction documents.
pub const COLLECTION: &str = "predictions";

#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Persist the record under its id, overwriting any pre-existing key.
    /// No read-back verification and no retry; a failed write fails the
    /// whole request.
    async fn save(&self, record: &PredictionRecord) -> Result<(), PredictError>;
}

pub struct RestDocumentStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestDocumentStore {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{}/{}", self.base_url, COLLECTION, id)
    }
}

#[async_trait]
impl PredictionStore for RestDocumentStore {
    async fn save(&self, record: &PredictionRecord) -> Result<(), PredictError> {
        let mut request = self
            .client
            .put(self.document_url(&record.id))
            .json(&record.document());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(PredictError::Persistence(format!(
                "store rejected write for {}: {}",
                record.id,
                response.status()
            )));
        }

        Ok(())
    }
}
