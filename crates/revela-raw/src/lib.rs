//! RAW file ingestion for revela
//!
//! Proprietary camera RAW files cannot be fully decoded here; instead this
//! crate turns an opaque RAW byte blob into a displayable raster through an
//! ordered chain of fallback strategies, tagging every result with its
//! provenance. The format registry classifies files by extension so callers
//! can bypass the chain entirely for non-RAW sources.
//!
//! This crate is deliberately a leaf: the post-processing pipeline in
//! revela-core depends on it, never the other way around.

mod chain;
mod formats;
mod strategies;

pub use chain::{
    run_chain, DecodeResult, IngestFailure, QualityTag, RawAsset, RawPreview, StrategyAttempt,
    StrategyKind,
};
pub use formats::{is_raw_extension, lookup_extension, lookup_filename, FormatInfo, RAW_FORMATS};
