//! Static registry of known camera RAW formats
//!
//! Maps file extensions to brand and human-readable description. Lookup is
//! case-insensitive and tolerates a leading dot, so `"photo.CR2"`,
//! `".cr2"` and `"cr2"` all resolve to the same entry.

/// Metadata for one known RAW format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Lowercase extension with leading dot, e.g. `".cr2"`
    pub extension: &'static str,

    /// Camera brand
    pub brand: &'static str,

    /// Human-readable format description
    pub description: &'static str,
}

/// All RAW formats the ingestion chain recognizes.
pub const RAW_FORMATS: &[FormatInfo] = &[
    FormatInfo { extension: ".cr2", brand: "Canon", description: "Canon RAW 2" },
    FormatInfo { extension: ".cr3", brand: "Canon", description: "Canon RAW 3" },
    FormatInfo { extension: ".crw", brand: "Canon", description: "Canon RAW" },
    FormatInfo { extension: ".nef", brand: "Nikon", description: "Nikon Electronic Format" },
    FormatInfo { extension: ".nrw", brand: "Nikon", description: "Nikon RAW" },
    FormatInfo { extension: ".arw", brand: "Sony", description: "Sony Alpha RAW" },
    FormatInfo { extension: ".srf", brand: "Sony", description: "Sony RAW Format" },
    FormatInfo { extension: ".sr2", brand: "Sony", description: "Sony RAW 2" },
    FormatInfo { extension: ".dng", brand: "Adobe", description: "Digital Negative" },
    FormatInfo { extension: ".orf", brand: "Olympus", description: "Olympus RAW Format" },
    FormatInfo { extension: ".rw2", brand: "Panasonic", description: "Panasonic RAW 2" },
    FormatInfo { extension: ".raw", brand: "Panasonic", description: "Panasonic RAW" },
    FormatInfo { extension: ".pef", brand: "Pentax", description: "Pentax Electronic Format" },
    FormatInfo { extension: ".ptx", brand: "Pentax", description: "Pentax RAW" },
    FormatInfo { extension: ".raf", brand: "Fujifilm", description: "Fuji RAW Format" },
    FormatInfo { extension: ".srw", brand: "Samsung", description: "Samsung RAW" },
    FormatInfo { extension: ".rwl", brand: "Leica", description: "Leica RAW" },
    FormatInfo { extension: ".dcs", brand: "Kodak", description: "Kodak Digital Camera System" },
    FormatInfo { extension: ".iiq", brand: "Phase One", description: "Intelligent Image Quality" },
    FormatInfo { extension: ".3fr", brand: "Hasselblad", description: "Hasselblad 3F RAW" },
    FormatInfo { extension: ".mef", brand: "Mamiya", description: "Mamiya Electronic Format" },
];

/// Look up a format by extension (with or without leading dot, any case).
pub fn lookup_extension(ext: &str) -> Option<&'static FormatInfo> {
    let lower = ext.to_lowercase();
    let dotted = if lower.starts_with('.') {
        lower
    } else {
        format!(".{}", lower)
    };
    RAW_FORMATS.iter().find(|f| f.extension == dotted)
}

/// Look up a format from a full file name, e.g. `"photo.CR2"`.
pub fn lookup_filename(name: &str) -> Option<&'static FormatInfo> {
    let ext = name.rsplit('.').next()?;
    // A name without any dot has no extension (rsplit yields the whole name)
    if ext.len() == name.len() {
        return None;
    }
    lookup_extension(ext)
}

/// Check whether an extension belongs to a known RAW format.
pub fn is_raw_extension(ext: &str) -> bool {
    lookup_extension(ext).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_mixed_case_filename() {
        let info = lookup_filename("photo.CR2").expect("CR2 should be registered");
        assert_eq!(info.brand, "Canon");
        assert_eq!(info.extension, ".cr2");
    }

    #[test]
    fn test_lookup_extension_variants() {
        assert!(lookup_extension("nef").is_some());
        assert!(lookup_extension(".NEF").is_some());
        assert!(lookup_extension("jpg").is_none());
    }

    #[test]
    fn test_filename_without_extension() {
        assert!(lookup_filename("README").is_none());
    }

    #[test]
    fn test_all_supported_brands_present() {
        let brands = [
            "Canon",
            "Nikon",
            "Sony",
            "Adobe",
            "Olympus",
            "Panasonic",
            "Pentax",
            "Fujifilm",
            "Samsung",
            "Leica",
            "Kodak",
            "Phase One",
            "Hasselblad",
            "Mamiya",
        ];
        for brand in brands {
            assert!(
                RAW_FORMATS.iter().any(|f| f.brand == brand),
                "missing brand: {}",
                brand
            );
        }
    }

    #[test]
    fn test_is_raw_extension() {
        assert!(is_raw_extension("arw"));
        assert!(is_raw_extension("3fr"));
        assert!(!is_raw_extension("png"));
    }
}
