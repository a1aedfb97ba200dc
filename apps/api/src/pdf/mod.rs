//! PDF rasterization — turns the first page of an uploaded resume into a JPEG
//! the vision model can read.
//!
//! `AppState` holds an `Arc<dyn PageRasterizer>`; the PDFium backend is the
//! production implementation.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub mod encode;
pub mod pdfium;

pub use encode::{encode_jpeg, ResumeImage};
pub use pdfium::PdfiumRasterizer;

/// Every PDF file starts with this signature.
const PDF_SIGNATURE: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Uploaded file is not a PDF")]
    NotAPdf,

    #[error("PDF has no pages")]
    NoPages,

    #[error("PDF could not be loaded: {0}")]
    Load(String),

    #[error("PDFium library could not be bound: {0}")]
    Bind(String),

    #[error("Page rendering failed: {0}")]
    Render(String),

    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Converts page one of a PDF into JPEG bytes.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    async fn first_page_jpeg(&self, pdf: Bytes) -> Result<Vec<u8>, RasterError>;
}

/// Checks the file signature. Leading whitespace before `%PDF-` is tolerated
/// the way most readers do.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    bytes[start..].starts_with(PDF_SIGNATURE)
}
