//! Revela Core Library
//!
//! Pixel adjustment pipeline and supporting machinery for the photo editor:
//! edit descriptors, the stage-ordered per-pixel pipeline, source decoding
//! (RAW sources route through revela-raw), exporters, and the coalescing
//! preview scheduler.

pub mod clarity;
pub mod color;
pub mod color_adjust;
pub mod config;
pub mod decoders;
pub mod effects;
pub mod error;
pub mod exporters;
pub mod models;
pub mod pipeline;
pub mod scheduler;
pub mod tone;

// Re-export commonly used types
pub use color::Hsl;
pub use decoders::{decode_file, decode_from_bytes, DecodedImage, RawProvenance};
pub use error::RevelaError;
pub use exporters::{export_image, ExportFormat};
pub use models::{EditDescriptor, QuickAction, Rotation};
pub use pipeline::{before_after_composite, process_image, PixelBuffer};
pub use scheduler::{PreviewFrame, PreviewScheduler};
