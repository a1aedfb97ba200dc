use std::sync::Arc;

use minijinja::Environment;

use crate::llm_client::LlmClient;
use crate::pdf::PageRasterizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Pluggable rasterizer. Default: PdfiumRasterizer; tests substitute a stub.
    pub rasterizer: Arc<dyn PageRasterizer>,
    /// Page templates, compiled once at startup.
    pub templates: Arc<Environment<'static>>,
}
