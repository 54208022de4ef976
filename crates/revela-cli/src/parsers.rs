//! Parsing functions for export formats and comparison splits.

use revela_core::ExportFormat;

/// Parse an export format name plus a quality factor into an [`ExportFormat`]
///
/// # Arguments
/// * `format` - One of "png", "jpeg"/"jpg", "tiff16"/"tiff"
/// * `quality` - Lossy quality factor in 0.0-1.0; ignored by lossless formats
pub fn parse_export_format(format: &str, quality: f32) -> Result<ExportFormat, String> {
    if !(0.0..=1.0).contains(&quality) {
        return Err(format!(
            "Quality must be in range [0.0, 1.0], got: {}",
            quality
        ));
    }

    match format.to_lowercase().as_str() {
        "png" => Ok(ExportFormat::Png),
        "jpeg" | "jpg" => Ok(ExportFormat::Jpeg { quality }),
        "tiff16" | "tiff" | "tif" => Ok(ExportFormat::Tiff16),
        other => Err(format!(
            "Unknown export format: {} (expected png, jpeg, or tiff16)",
            other
        )),
    }
}

/// Parse a before/after split position in 0.0-1.0
pub fn parse_split(split_str: &str) -> Result<f32, String> {
    let split = split_str
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("Invalid split position: {}", split_str))?;
    if !(0.0..=1.0).contains(&split) {
        return Err(format!(
            "Split position {} must be in range [0.0, 1.0]",
            split
        ));
    }
    Ok(split)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_export_format_names() {
        assert_eq!(parse_export_format("png", 1.0).unwrap(), ExportFormat::Png);
        assert_eq!(
            parse_export_format("JPEG", 0.8).unwrap(),
            ExportFormat::Jpeg { quality: 0.8 }
        );
        assert_eq!(
            parse_export_format("tiff16", 1.0).unwrap(),
            ExportFormat::Tiff16
        );
    }

    #[test]
    fn test_parse_export_format_rejects_unknown() {
        assert!(parse_export_format("bmp", 1.0).is_err());
    }

    #[test]
    fn test_parse_export_format_rejects_out_of_range_quality() {
        assert!(parse_export_format("jpeg", 1.5).is_err());
        assert!(parse_export_format("jpeg", -0.1).is_err());
    }

    #[test]
    fn test_parse_split() {
        assert!((parse_split("0.5").unwrap() - 0.5).abs() < f32::EPSILON);
        assert!(parse_split("1.5").is_err());
        assert!(parse_split("abc").is_err());
    }
}
