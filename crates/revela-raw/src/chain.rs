//! Ordered fallback decode chain
//!
//! The chain walks a fixed priority list of strategies until one produces a
//! raster. Per-strategy failures are absorbed and recorded; the chain only
//! errors when every strategy has failed, and then it reports every attempt
//! so the caller can point the user toward an external converter.

use std::fmt;

use crate::formats::{self, FormatInfo};
use crate::strategies;

/// Identity of one fallback strategy, in chain priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    EmbeddedThumbnail,
    SyntheticDemosaic,
    Placeholder,
}

impl StrategyKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::EmbeddedThumbnail => "embedded-thumbnail",
            Self::SyntheticDemosaic => "synthetic-demosaic",
            Self::Placeholder => "placeholder",
        }
    }

    /// Quality tag carried by rasters this strategy produces.
    pub fn quality(self) -> QualityTag {
        match self {
            Self::EmbeddedThumbnail => QualityTag::Thumbnail,
            Self::SyntheticDemosaic => QualityTag::Approximate,
            Self::Placeholder => QualityTag::Placeholder,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Provenance tag describing how faithful the decoded raster is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTag {
    /// Real image data from the embedded preview JPEG
    Thumbnail,
    /// Crude per-channel mapping of raw bytes, not real demosaicing
    Approximate,
    /// Generated graphic, carries no image data from the file
    Placeholder,
}

impl QualityTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Approximate => "approximate",
            Self::Placeholder => "placeholder",
        }
    }
}

impl fmt::Display for QualityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Displayable RGBA raster produced by a strategy.
#[derive(Debug, Clone)]
pub struct RawPreview {
    pub width: u32,
    pub height: u32,
    /// Interleaved RGBA, length `width * height * 4`
    pub rgba: Vec<u8>,
}

/// One failed strategy and why it failed.
#[derive(Debug, Clone)]
pub struct StrategyAttempt {
    pub strategy: StrategyKind,
    pub error: String,
}

/// Successful ingestion outcome.
#[derive(Debug, Clone)]
pub struct DecodeResult {
    pub preview: RawPreview,
    pub strategy: StrategyKind,
    pub quality: QualityTag,
    pub format: Option<&'static FormatInfo>,
    /// Human-readable provenance: file name, brand, byte size
    pub label: String,
    /// Strategies that failed before this one succeeded
    pub attempts: Vec<StrategyAttempt>,
}

/// Every strategy failed. Reachable only when placeholder synthesis itself
/// errors, which callers should treat as fatal rather than a normal outcome.
#[derive(Debug, Clone)]
pub struct IngestFailure {
    pub attempts: Vec<StrategyAttempt>,
    pub brand: Option<&'static str>,
}

impl fmt::Display for IngestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tried: Vec<&str> = self.attempts.iter().map(|a| a.strategy.name()).collect();
        write!(
            f,
            "all {} ingestion strategies failed (tried: {})",
            self.attempts.len(),
            tried.join(", ")
        )?;
        if let Some(brand) = self.brand {
            write!(f, " for {} RAW file", brand)?;
        }
        if let Some(last) = self.attempts.last() {
            write!(f, "; last error: {}", last.error)?;
        }
        Ok(())
    }
}

impl std::error::Error for IngestFailure {}

/// Run the fallback chain on a RAW byte blob.
///
/// Strategies run strictly sequentially in fixed priority order; the first
/// success wins and later strategies never run.
pub fn run_chain(
    file_name: &str,
    format: Option<&'static FormatInfo>,
    bytes: &[u8],
) -> Result<DecodeResult, IngestFailure> {
    const ORDER: [StrategyKind; 3] = [
        StrategyKind::EmbeddedThumbnail,
        StrategyKind::SyntheticDemosaic,
        StrategyKind::Placeholder,
    ];

    let mut attempts = Vec::new();
    for kind in ORDER {
        let outcome = match kind {
            StrategyKind::EmbeddedThumbnail => strategies::embedded_thumbnail(bytes),
            StrategyKind::SyntheticDemosaic => strategies::synthetic_demosaic(bytes),
            StrategyKind::Placeholder => strategies::placeholder(format),
        };

        match outcome {
            Ok(preview) => {
                return Ok(DecodeResult {
                    preview,
                    strategy: kind,
                    quality: kind.quality(),
                    format,
                    label: make_label(file_name, format, bytes.len()),
                    attempts,
                });
            }
            Err(error) => attempts.push(StrategyAttempt {
                strategy: kind,
                error,
            }),
        }
    }

    Err(IngestFailure {
        attempts,
        brand: format.map(|f| f.brand),
    })
}

fn make_label(file_name: &str, format: Option<&'static FormatInfo>, size: usize) -> String {
    match format {
        Some(info) => format!(
            "{} ({} {}), {} bytes",
            file_name, info.brand, info.description, size
        ),
        None => format!("{} (unrecognized RAW), {} bytes", file_name, size),
    }
}

/// A RAW file opened for ingestion.
///
/// The byte blob is immutable; the decode result is produced once and cached
/// on the asset.
#[derive(Debug)]
pub struct RawAsset {
    file_name: String,
    bytes: Vec<u8>,
    format: Option<&'static FormatInfo>,
    decoded: Option<DecodeResult>,
}

impl RawAsset {
    /// Open an asset, classifying its format from the file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let format = formats::lookup_filename(&file_name);
        Self {
            file_name,
            bytes,
            format,
            decoded: None,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> Option<&'static FormatInfo> {
        self.format
    }

    /// Whether the extension matched a known RAW format. Callers should
    /// bypass the chain for non-RAW sources.
    pub fn is_raw(&self) -> bool {
        self.format.is_some()
    }

    /// Run the fallback chain, caching the result on first success.
    pub fn ingest(&mut self) -> Result<&DecodeResult, IngestFailure> {
        match self.decoded {
            Some(ref result) => Ok(result),
            None => {
                let result = run_chain(&self.file_name, self.format, &self.bytes)?;
                Ok(self.decoded.insert(result))
            }
        }
    }
}
