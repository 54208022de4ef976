//! Source decoding and RAW routing
//!
//! A single entry point turns file bytes into a [`PixelBuffer`]. Files whose
//! extension is in the RAW registry go through the revela-raw fallback chain
//! and carry provenance describing which strategy produced the pixels;
//! everything else decodes through the `image` crate.

use std::fs;
use std::path::Path;

use crate::error::RevelaError;
use crate::pipeline::PixelBuffer;
use crate::verbose_println;
use revela_raw::{QualityTag, RawAsset, StrategyKind};

/// A decoded source image plus where its pixels came from.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub buffer: PixelBuffer,

    /// Present only for RAW sources. `None` means a standard codec decoded
    /// the file at full fidelity.
    pub raw: Option<RawProvenance>,
}

/// How the RAW ingestion chain obtained a preview.
#[derive(Debug, Clone)]
pub struct RawProvenance {
    pub strategy: StrategyKind,
    pub quality: QualityTag,

    /// Human-readable description, e.g. "Embedded thumbnail (Canon CR2)"
    pub label: String,

    /// Camera brand from the format registry, when the extension is known
    pub brand: Option<&'static str>,
}

/// Decode in-memory file bytes. `file_name` drives format routing; only its
/// extension is inspected.
pub fn decode_from_bytes(data: &[u8], file_name: &str) -> Result<DecodedImage, RevelaError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| {
            RevelaError::UnsupportedSource(format!("no file extension on '{}'", file_name))
        })?;

    if revela_raw::is_raw_extension(&extension) {
        return decode_raw(data, file_name);
    }

    match extension.as_str() {
        "jpg" | "jpeg" | "png" | "tif" | "tiff" => decode_standard(data, file_name),
        other => Err(RevelaError::UnsupportedSource(format!(
            "unsupported file format: {}",
            other
        ))),
    }
}

/// Decode a file from disk.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<DecodedImage, RevelaError> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| RevelaError::UnsupportedSource(format!("invalid path: {:?}", path)))?
        .to_string();
    let data = fs::read(path)?;
    decode_from_bytes(&data, &file_name)
}

fn decode_standard(data: &[u8], file_name: &str) -> Result<DecodedImage, RevelaError> {
    let img = image::load_from_memory(data)
        .map_err(|e| RevelaError::UnsupportedSource(format!("decode '{}': {}", file_name, e)))?;
    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    verbose_println!("[DEBUG] decoded {} ({}x{})", file_name, width, height);
    let buffer = PixelBuffer::new(width, height, rgba.into_raw())?;
    Ok(DecodedImage { buffer, raw: None })
}

fn decode_raw(data: &[u8], file_name: &str) -> Result<DecodedImage, RevelaError> {
    let mut asset = RawAsset::new(file_name, data.to_vec());
    let result = asset.ingest()?;
    verbose_println!(
        "[DEBUG] RAW ingest {}: {} ({} attempt(s))",
        file_name,
        result.strategy.name(),
        result.attempts.len() + 1
    );
    let provenance = RawProvenance {
        strategy: result.strategy,
        quality: result.quality,
        label: result.label.clone(),
        brand: result.format.map(|f| f.brand),
    };
    let buffer = PixelBuffer::from(result.preview.clone());
    Ok(DecodedImage {
        buffer,
        raw: Some(provenance),
    })
}
