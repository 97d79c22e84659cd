//! Image normalization
//!
//! Decodes an upload, fits it inside the configured bounds and re-encodes it as
//! JPEG. Runs synchronously; async callers wrap it in `spawn_blocking`.

use folio_core::AppError;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader};
use std::io::Cursor;
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        AppError::ProcessingFailed(err.to_string())
    }
}

/// Output of [`ImageProcessor::process`]
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy)]
pub struct ImageProcessor {
    max_width: u32,
    max_height: u32,
    jpeg_quality: u8,
}

impl ImageProcessor {
    pub fn new(max_width: u32, max_height: u32, jpeg_quality: u8) -> Self {
        Self {
            max_width,
            max_height,
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    /// Decode `data`, downscale it to fit `max_width` x `max_height` (aspect
    /// ratio kept, never upscaled) and encode it as JPEG.
    pub fn process(&self, data: &[u8]) -> Result<NormalizedImage, ProcessingError> {
        let start = Instant::now();

        let reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;
        let img = reader
            .decode()
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;

        let (src_width, src_height) = img.dimensions();
        let img = self.fit(img);
        let (width, height) = img.dimensions();

        // JPEG has no alpha channel
        let rgb = img.to_rgb8();
        let mut bytes = Vec::new();
        JpegEncoder::new_with_quality(&mut bytes, self.jpeg_quality)
            .encode_image(&rgb)
            .map_err(|e| ProcessingError::Encode(e.to_string()))?;

        tracing::debug!(
            src_width,
            src_height,
            width,
            height,
            input_bytes = data.len(),
            output_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Image normalized"
        );

        Ok(NormalizedImage {
            bytes,
            width,
            height,
        })
    }

    fn fit(&self, img: DynamicImage) -> DynamicImage {
        let (width, height) = img.dimensions();
        if width <= self.max_width && height <= self.max_height {
            return img;
        }
        img.resize(self.max_width, self.max_height, FilterType::Lanczos3)
    }
}
