use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a single model invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// One of the labels in [`crate::policy::CLASSES`].
    pub label: &'static str,
    /// Maximum class probability as a percentage, in [0, 100].
    pub confidence_score: f32,
}

/// The persisted outcome of one prediction request. Written exactly once,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub id: String,
    pub result: String,
    pub suggestion: String,
    pub created_at: String,
}

/// The stored document: [`PredictionRecord`] minus `id`, which is the
/// document key in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictionDocument {
    pub result: String,
    pub suggestion: String,
    pub created_at: String,
}

impl PredictionRecord {
    /// Build a record with a fresh random id and the current timestamp.
    /// The id is always generated here, never taken from the request.
    pub fn new(result: &str, suggestion: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            result: result.to_string(),
            suggestion: suggestion.to_string(),
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn document(&self) -> PredictionDocument {
        PredictionDocument {
            result: self.result.clone(),
            suggestion: self.suggestion.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub data: PredictionRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let record = PredictionRecord::new("Cancer", "Immediate medical consultation advised.");
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["result"], "Cancer");
    }

    #[test]
    fn record_and_document_round_trip_through_json() {
        let record = PredictionRecord::new("Cancer", "Immediate medical consultation advised.");
        let json = serde_json::to_string(&record).unwrap();
        let parsed: PredictionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);

        let doc_json = serde_json::to_string(&record.document()).unwrap();
        let parsed_doc: PredictionDocument = serde_json::from_str(&doc_json).unwrap();
        assert_eq!(parsed_doc, record.document());
    }

    #[test]
    fn created_at_is_iso_8601() {
        let record = PredictionRecord::new("Non Cancer", "Medical consultation not necessary.");
        assert!(chrono::DateTime::parse_from_rfc3339(&record.created_at).is_ok());
        assert!(record.created_at.ends_with('Z'));
    }

    #[test]
    fn generated_ids_are_valid_uuids() {
        let record = PredictionRecord::new("Cancer", "x");
        assert!(Uuid::parse_str(&record.id).is_ok());
    }

    #[test]
    fn generated_ids_are_unique_across_many_records() {
        let ids: HashSet<String> = (0..10_000)
            .map(|_| PredictionRecord::new("Cancer", "x").id)
            .collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn document_drops_only_the_id() {
        let record = PredictionRecord::new("Cancer", "y");
        let doc = record.document();
        assert_eq!(doc.result, record.result);
        assert_eq!(doc.suggestion, record.suggestion);
        assert_eq!(doc.created_at, record.created_at);
    }
}
