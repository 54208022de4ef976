//! Fallback decode strategies
//!
//! Each strategy takes the opaque byte blob and either produces a
//! displayable RGBA raster or reports why it could not. The chain in
//! `chain.rs` walks them in priority order.

use crate::chain::RawPreview;
use crate::formats::FormatInfo;

/// JPEG start-of-image marker followed by the first APP/frame byte.
const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// JPEG end-of-image marker.
const JPEG_EOI: [u8; 2] = [0xFF, 0xD9];

/// Per-channel scalars for the synthetic demosaic approximation.
/// These are a crude fixed mapping, not real demosaicing.
const DEMOSAIC_SCALE: [f32; 3] = [1.0, 0.92, 0.85];

const PLACEHOLDER_WIDTH: u32 = 480;
const PLACEHOLDER_HEIGHT: u32 = 320;

/// Extract and decode an embedded JPEG thumbnail.
///
/// RAW containers almost always carry a JPEG preview for fast display. The
/// blob is scanned for the first `FFD8FF` start marker and the first `FFD9`
/// end marker after it; the sub-range is decoded as JPEG.
pub(crate) fn embedded_thumbnail(bytes: &[u8]) -> Result<RawPreview, String> {
    let start = find_marker(bytes, &JPEG_SOI, 0)
        .ok_or_else(|| "no embedded JPEG start marker found".to_string())?;
    let end = find_marker(bytes, &JPEG_EOI, start + JPEG_SOI.len())
        .ok_or_else(|| "embedded JPEG has no end marker".to_string())?;

    let jpeg = &bytes[start..end + JPEG_EOI.len()];
    let img = image::load_from_memory_with_format(jpeg, image::ImageFormat::Jpeg)
        .map_err(|e| format!("embedded JPEG failed to decode: {}", e))?;

    let rgba = img.to_rgba8();
    Ok(RawPreview {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// Derive a raster directly from the raw bytes.
///
/// Bytes are read in triplets past a small header skip and mapped through
/// fixed per-channel scalars. The output is only a rough impression of the
/// sensor data but it always succeeds when the file has at least 3 bytes.
pub(crate) fn synthetic_demosaic(bytes: &[u8]) -> Result<RawPreview, String> {
    if bytes.len() < 3 {
        return Err(format!(
            "file too small for synthetic demosaic: {} bytes, need at least 3",
            bytes.len()
        ));
    }

    // Skip a fraction of the file so vendor headers don't dominate the top rows
    let header_skip = bytes.len() / 8;
    let usable = bytes.len() - header_skip;

    let dim = (((usable / 3) as f64).sqrt() as u32).clamp(16, 512);
    let pixel_count = (dim * dim) as usize;

    let mut rgba = Vec::with_capacity(pixel_count * 4);
    for i in 0..pixel_count {
        let base = header_skip + (i * 3) % usable.max(1);
        for (c, &scale) in DEMOSAIC_SCALE.iter().enumerate() {
            let raw = bytes[(base + c) % bytes.len()];
            rgba.push((raw as f32 * scale).clamp(0.0, 255.0) as u8);
        }
        rgba.push(255);
    }

    Ok(RawPreview {
        width: dim,
        height: dim,
        rgba,
    })
}

/// Render a generated placeholder card.
///
/// A deterministic gradient with a brand-tinted header band. The file name,
/// brand and size travel in `DecodeResult::label`; no text is rasterized.
pub(crate) fn placeholder(format: Option<&'static FormatInfo>) -> Result<RawPreview, String> {
    let (width, height) = (PLACEHOLDER_WIDTH, PLACEHOLDER_HEIGHT);
    let accent = brand_accent(format.map(|f| f.brand).unwrap_or("RAW"));

    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        let t = y as f32 / (height - 1) as f32;
        // Dark vertical gradient for the card body
        let base = (34.0 + 38.0 * t) as u8;
        for x in 0..width {
            let border = x < 4 || y < 4 || x >= width - 4 || y >= height - 4;
            let header = y < 48;
            let (r, g, b) = if border {
                (90, 90, 94)
            } else if header {
                accent
            } else {
                (base, base, base + 4)
            };
            rgba.extend_from_slice(&[r, g, b, 255]);
        }
    }

    Ok(RawPreview {
        width,
        height,
        rgba,
    })
}

/// Derive a stable accent color from the brand name.
fn brand_accent(brand: &str) -> (u8, u8, u8) {
    // FNV-1a over the brand string
    let mut hash: u32 = 0x811c_9dc5;
    for byte in brand.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    (
        72 + (hash & 0x3F) as u8,
        72 + ((hash >> 8) & 0x3F) as u8,
        72 + ((hash >> 16) & 0x3F) as u8,
    )
}

/// Find `needle` in `haystack` starting at `from`.
fn find_marker(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}
