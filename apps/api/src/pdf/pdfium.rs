//! PDFium-backed rasterizer.
//!
//! PDFium is not thread-safe: every render binds the library on a blocking
//! thread while holding `render_lock`.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, RgbaImage};
use pdfium_render::prelude::*;
use tracing::{debug, info};

use crate::pdf::{encode_jpeg, looks_like_pdf, PageRasterizer, RasterError};

/// PDF user space is 72 points per inch.
const POINTS_PER_INCH: f32 = 72.0;

#[derive(Clone)]
pub struct PdfiumRasterizer {
    library_dir: Option<PathBuf>,
    dpi: f32,
    jpeg_quality: u8,
    render_lock: Arc<Mutex<()>>,
}

impl PdfiumRasterizer {
    /// Binds PDFium once so a missing shared library fails at startup rather
    /// than on the first upload.
    pub fn new(
        library_dir: Option<PathBuf>,
        dpi: f32,
        jpeg_quality: u8,
    ) -> Result<Self, RasterError> {
        bind(library_dir.as_deref())?;
        info!(
            "PDFium bound from {}",
            library_dir
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "system library".to_string())
        );

        Ok(Self {
            library_dir,
            dpi,
            jpeg_quality,
            render_lock: Arc::new(Mutex::new(())),
        })
    }

    fn render_blocking(&self, pdf: &[u8]) -> Result<Vec<u8>, RasterError> {
        // A poisoned lock only means a previous render panicked; PDFium state is
        // rebuilt per call, so it is safe to continue.
        let _guard = self
            .render_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let pdfium = Pdfium::new(bind(self.library_dir.as_deref())?);
        let document = pdfium
            .load_pdf_from_byte_slice(pdf, None)
            .map_err(|e| RasterError::Load(e.to_string()))?;

        let pages = document.pages();
        if pages.is_empty() {
            return Err(RasterError::NoPages);
        }
        let page = pages.first().map_err(|_| RasterError::NoPages)?;

        let config = PdfRenderConfig::new().scale_page_by_factor(self.dpi / POINTS_PER_INCH);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| RasterError::Render(e.to_string()))?;

        let (width, height) = (bitmap.width() as u32, bitmap.height() as u32);
        let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(|| {
            RasterError::Render(format!("bitmap buffer does not match {width}x{height}"))
        })?;
        debug!("Rendered first page at {width}x{height}px ({} dpi)", self.dpi);

        encode_jpeg(&DynamicImage::ImageRgba8(rgba), self.jpeg_quality)
    }
}

#[async_trait]
impl PageRasterizer for PdfiumRasterizer {
    async fn first_page_jpeg(&self, pdf: Bytes) -> Result<Vec<u8>, RasterError> {
        if !looks_like_pdf(&pdf) {
            return Err(RasterError::NotAPdf);
        }

        let rasterizer = self.clone();
        tokio::task::spawn_blocking(move || rasterizer.render_blocking(&pdf)).await?
    }
}

fn bind(library_dir: Option<&Path>) -> Result<Box<dyn PdfiumLibraryBindings>, RasterError> {
    let bindings = match library_dir {
        Some(dir) => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir)),
        None => Pdfium::bind_to_system_library(),
    };
    bindings.map_err(|e| RasterError::Bind(e.to_string()))
}
