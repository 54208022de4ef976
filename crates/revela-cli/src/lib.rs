//! Shared utilities for revela-cli
//!
//! Argument parsing helpers and the edit-file loader, kept out of main.rs
//! so they stay unit-testable.

pub mod parsers;
pub mod processing;

pub use parsers::{parse_export_format, parse_split};
pub use processing::{base_descriptor, determine_output_path, load_edit_file, save_edit_file};
