//! Edit-file loading and output path handling.

use std::fs;
use std::path::{Path, PathBuf};

use revela_core::EditDescriptor;

/// Load an [`EditDescriptor`] from a YAML file. Missing fields take their
/// defaults, so a file may set only the parameters it cares about.
pub fn load_edit_file<P: AsRef<Path>>(path: P) -> Result<EditDescriptor, String> {
    let contents = fs::read_to_string(path.as_ref())
        .map_err(|e| format!("Failed to read edit file {}: {}", path.as_ref().display(), e))?;
    serde_yaml::from_str(&contents)
        .map_err(|e| format!("Failed to parse edit file {}: {}", path.as_ref().display(), e))
}

/// Resolve the starting descriptor for an edit run: the YAML file when one
/// is given, otherwise the all-defaults descriptor. Takes the path by
/// reference so the caller's argument set stays usable for flag overrides.
pub fn base_descriptor(edit_file: Option<&Path>) -> Result<EditDescriptor, String> {
    match edit_file {
        Some(path) => load_edit_file(path),
        None => Ok(EditDescriptor::default()),
    }
}

/// Serialize an [`EditDescriptor`] to a YAML file.
pub fn save_edit_file<P: AsRef<Path>>(edit: &EditDescriptor, path: P) -> Result<(), String> {
    let yaml = serde_yaml::to_string(edit)
        .map_err(|e| format!("Failed to serialize edit: {}", e))?;
    fs::write(path.as_ref(), yaml)
        .map_err(|e| format!("Failed to write edit file {}: {}", path.as_ref().display(), e))
}

/// Determine the output path for a processed image.
///
/// Uses the input's file stem with the export extension, placed either next
/// to the input or inside `out_dir` when given.
pub fn determine_output_path(
    input: &Path,
    out_dir: Option<&Path>,
    extension: &str,
) -> Result<PathBuf, String> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("Cannot determine file stem for {}", input.display()))?;

    let file_name = format!("{}_edited.{}", stem, extension);
    let path = match out_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    };
    Ok(path)
}
