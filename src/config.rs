//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded from the process environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind the HTTP server to
    pub host: String,

    /// Server port
    pub port: u16,

    /// Path to the ONNX classification model
    pub model_path: PathBuf,

    /// Base URL of the document store
    pub store_url: String,

    /// Optional bearer token for the document store
    pub store_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("model.onnx")),

            store_url: env::var("STORE_URL")
                .unwrap_or_else(|_| "http://localhost:5984".to_string()),

            store_api_key: env::var("STORE_API_KEY").ok(),
        }
    }
}
