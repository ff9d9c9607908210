mod classifier;
mod config;
mod error;
mod handlers;
mod models;
mod policy;
mod preprocess;
mod store;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::classifier::OnnxClassifier;
use crate::config::Config;
use crate::handlers::AppState;
use crate::store::RestDocumentStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lesion_screening_backend=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // The model must be in place before the server binds; a process with no
    // model would deterministically fail every request.
    tracing::info!(model = %config.model_path.display(), "loading classification model");
    let classifier = OnnxClassifier::load(&config.model_path)
        .with_context(|| format!("failed to load model from {}", config.model_path.display()))?;

    let state = web::Data::new(AppState {
        classifier: Arc::new(classifier),
        store: Arc::new(RestDocumentStore::new(
            &config.store_url,
            config.store_api_key.clone(),
        )),
    });

    tracing::info!(host = %config.host, port = config.port, "server starting");
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(web::resource("/predict").route(web::post().to(handlers::predict)))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
