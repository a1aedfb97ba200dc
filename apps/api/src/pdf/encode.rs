use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine as _};
use image::{codecs::jpeg::JpegEncoder, DynamicImage};
use serde::Serialize;

use crate::pdf::RasterError;

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// A rendered resume page, packaged for an inline-data model part.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeImage {
    pub mime_type: &'static str,
    /// Standard-alphabet base64 of the JPEG bytes.
    pub data: String,
}

impl ResumeImage {
    pub fn from_jpeg(jpeg: &[u8]) -> Self {
        Self {
            mime_type: JPEG_MIME_TYPE,
            data: BASE64_STANDARD.encode(jpeg),
        }
    }
}

/// JPEG-encodes a rendered page. Alpha is dropped since JPEG has no alpha channel.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, RasterError> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)?;
    Ok(buf.into_inner())
}
