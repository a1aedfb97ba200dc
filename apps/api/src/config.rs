use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Beyond this a letter page is over 10k pixels wide.
const MAX_RENDER_DPI: f32 = 1200.0;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_api_base: String,
    pub port: u16,
    pub rust_log: String,
    /// Directory holding the PDFium shared library. `None` binds the system library.
    pub pdfium_library_path: Option<PathBuf>,
    pub render_dpi: f32,
    pub jpeg_quality: u8,
    pub max_upload_mb: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            gemini_api_base: std::env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string()),
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            pdfium_library_path: std::env::var("PDFIUM_LIBRARY_PATH").ok().map(PathBuf::from),
            render_dpi: validate_render_dpi(env_or("RENDER_DPI", 200.0)?)?,
            jpeg_quality: clamp_jpeg_quality(env_or("JPEG_QUALITY", 75)?),
            max_upload_mb: env_or("MAX_UPLOAD_MB", 200)?,
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn validate_render_dpi(dpi: f32) -> Result<f32> {
    if dpi.is_finite() && dpi > 0.0 && dpi <= MAX_RENDER_DPI {
        Ok(dpi)
    } else {
        bail!("Environment variable 'RENDER_DPI' must be in (0, {MAX_RENDER_DPI}], got {dpi}")
    }
}

fn clamp_jpeg_quality(quality: u32) -> u8 {
    quality.clamp(1, 100) as u8
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
