mod config;
mod errors;
mod evaluation;
mod llm_client;
mod pdf;
mod routes;
mod state;
mod ui;

#[cfg(test)]
mod testing;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::pdf::PdfiumRasterizer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::ui::templates::build_templates;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing GOOGLE_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS Resume Expert v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PDFium rasterizer
    let rasterizer = PdfiumRasterizer::new(
        config.pdfium_library_path.clone(),
        config.render_dpi,
        config.jpeg_quality,
    )?;
    info!(
        "Rasterizer initialized: {} dpi, JPEG quality {}",
        config.render_dpi, config.jpeg_quality
    );

    // Initialize LLM client
    let llm = LlmClient::new(config.google_api_key.clone(), &config.gemini_api_base)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let templates = build_templates()?;

    let state = AppState {
        llm,
        rasterizer: Arc::new(rasterizer),
        templates: Arc::new(templates),
    };

    let app = build_router(state)
        .layer(DefaultBodyLimit::max(config.max_upload_bytes()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
