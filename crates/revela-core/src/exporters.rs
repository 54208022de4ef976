//! Image exporters for the supported output formats
//!
//! Export a processed [`PixelBuffer`] to PNG, JPEG, or 16-bit TIFF. JPEG
//! drops the alpha channel; TIFF widens 8-bit channels to 16-bit RGB.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::RevelaError;
use crate::pipeline::PixelBuffer;

/// Output format for [`export_image`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportFormat {
    Png,
    /// Quality in 0.0-1.0, mapped onto the encoder's 1-100 scale
    Jpeg {
        quality: f32,
    },
    Tiff16,
}

impl ExportFormat {
    /// Canonical file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg { .. } => "jpg",
            Self::Tiff16 => "tiff",
        }
    }
}

/// Write `image` to `path` in the requested format.
pub fn export_image<P: AsRef<Path>>(
    image: &PixelBuffer,
    path: P,
    format: ExportFormat,
) -> Result<(), RevelaError> {
    match format {
        ExportFormat::Png => export_png(image, path),
        ExportFormat::Jpeg { quality } => export_jpeg(image, path, quality),
        ExportFormat::Tiff16 => export_tiff16(image, path),
    }
}

fn export_png<P: AsRef<Path>>(image: &PixelBuffer, path: P) -> Result<(), RevelaError> {
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    let encoder = image::codecs::png::PngEncoder::new(writer);
    image::ImageEncoder::write_image(
        encoder,
        image.data(),
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgba8,
    )
    .map_err(|e| RevelaError::ExportFailed(format!("PNG encode: {}", e)))?;
    Ok(())
}

fn export_jpeg<P: AsRef<Path>>(
    image: &PixelBuffer,
    path: P,
    quality: f32,
) -> Result<(), RevelaError> {
    // JPEG has no alpha channel; strip it before encoding
    let rgb: Vec<u8> = image
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let encoder_quality = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0) as u8;
    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, encoder_quality);
    image::ImageEncoder::write_image(
        encoder,
        &rgb,
        image.width(),
        image.height(),
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|e| RevelaError::ExportFailed(format!("JPEG encode: {}", e)))?;
    Ok(())
}

/// Export as 16-bit RGB TIFF. 8-bit channels widen by `v * 257` so 0 maps
/// to 0 and 255 maps to 65535 exactly.
pub fn export_tiff16<P: AsRef<Path>>(image: &PixelBuffer, path: P) -> Result<(), RevelaError> {
    let u16_data: Vec<u16> = image
        .data()
        .chunks_exact(4)
        .flat_map(|px| {
            [
                px[0] as u16 * 257,
                px[1] as u16 * 257,
                px[2] as u16 * 257,
            ]
        })
        .collect();

    let file = File::create(path.as_ref())?;
    let writer = BufWriter::new(file);
    let mut encoder = tiff::encoder::TiffEncoder::new(writer)
        .map_err(|e| RevelaError::ExportFailed(format!("TIFF encoder: {}", e)))?;
    encoder
        .write_image::<tiff::encoder::colortype::RGB16>(image.width(), image.height(), &u16_data)
        .map_err(|e| RevelaError::ExportFailed(format!("TIFF write: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn test_buffer(width: u32, height: u32) -> PixelBuffer {
        let mut data = vec![0u8; (width * height * 4) as usize];
        for (i, px) in data.chunks_exact_mut(4).enumerate() {
            px[0] = (i * 7 % 256) as u8;
            px[1] = (i * 13 % 256) as u8;
            px[2] = (i * 29 % 256) as u8;
            px[3] = 255;
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn test_export_png_roundtrip() {
        let image = test_buffer(10, 6);
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.png");

        export_image(&image, &path, ExportFormat::Png).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.width(), 10);
        assert_eq!(decoded.height(), 6);
        // PNG is lossless
        assert_eq!(decoded.as_raw().as_slice(), image.data());
    }

    #[test]
    fn test_export_jpeg_writes_file() {
        let image = test_buffer(16, 16);
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.jpg");

        export_image(&image, &path, ExportFormat::Jpeg { quality: 0.9 }).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
    }

    #[test]
    fn test_export_jpeg_quality_floor() {
        // quality 0.0 must still map to a valid encoder setting
        let image = test_buffer(8, 8);
        let dir = tempdir().unwrap();
        let path = dir.path().join("low.jpg");

        let result = export_image(&image, &path, ExportFormat::Jpeg { quality: 0.0 });
        assert!(result.is_ok());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_tiff16_writes_file() {
        let image = test_buffer(10, 10);
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.tiff");

        export_tiff16(&image, &path).unwrap();

        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_export_invalid_path() {
        let image = test_buffer(4, 4);
        let result = export_image(&image, "/nonexistent/dir/out.png", ExportFormat::Png);
        assert!(matches!(result, Err(RevelaError::Io(_))));
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(ExportFormat::Png.extension(), "png");
        assert_eq!(ExportFormat::Jpeg { quality: 0.8 }.extension(), "jpg");
        assert_eq!(ExportFormat::Tiff16.extension(), "tiff");
    }

    #[test]
    fn test_format_equality_compares_quality() {
        assert_eq!(
            ExportFormat::Jpeg { quality: 0.8 },
            ExportFormat::Jpeg { quality: 0.8 }
        );
        assert_ne!(
            ExportFormat::Jpeg { quality: 0.8 },
            ExportFormat::Jpeg { quality: 0.9 }
        );
        assert_ne!(ExportFormat::Png, ExportFormat::Tiff16);
    }
}
