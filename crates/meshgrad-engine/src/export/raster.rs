//! Raster encoding (PNG / JPEG) and PNG data URLs.

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::field::Pixmap;

/// Tri-level export quality.
///
/// Only lossy encodings consume it; PNG ignores it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    #[default]
    Normal,
    High,
}

impl Quality {
    /// JPEG quality parameter (1–100).
    pub fn jpeg_quality(self) -> u8 {
        match self {
            Self::Low => 50,
            Self::Normal => 80,
            Self::High => 100,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Low, Self::Normal, Self::High]
            .into_iter()
            .find(|q| q.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown quality {s:?} (expected low, normal or high)"))
    }
}

/// Encoded raster container.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RasterFormat {
    Png,
    Jpeg(Quality),
}

impl RasterFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg(_) => "image/jpeg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg(_) => "jpeg",
        }
    }
}

/// Encodes `pixmap` into `format`.
///
/// JPEG has no alpha channel; transparent pixels encode as black.
pub fn encode_raster(pixmap: &Pixmap, format: RasterFormat) -> Result<Vec<u8>, ExportError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    if pixmap.canvas().is_empty() {
        return Err(ExportError::EmptyCanvas { width, height });
    }

    let mut buf = Vec::new();
    match format {
        RasterFormat::Png => {
            PngEncoder::new(&mut buf).write_image(
                pixmap.as_bytes(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?;
        }
        RasterFormat::Jpeg(quality) => {
            JpegEncoder::new_with_quality(&mut buf, quality.jpeg_quality()).write_image(
                &pixmap.to_rgb_bytes(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }

    log::debug!("encoded {width}x{height} {} ({} bytes)", format.extension(), buf.len());
    Ok(buf)
}

/// Encodes `pixmap` as PNG inside a `data:image/png;base64,` URL.
pub fn png_data_url(pixmap: &Pixmap) -> Result<String, ExportError> {
    let png = encode_raster(pixmap, RasterFormat::Png)?;
    let mut url = String::from("data:image/png;base64,");
    base64::engine::general_purpose::STANDARD.encode_string(&png, &mut url);
    Ok(url)
}
