use clap::{Parser, Subcommand};
use revela_cli::{
    base_descriptor, determine_output_path, parse_export_format, parse_split, save_edit_file,
};
use revela_core::models::{EditDescriptor, QuickAction, Rotation};
use revela_core::{before_after_composite, decode_file, export_image, process_image};
use revela_raw::{RawAsset, RAW_FORMATS};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "revela")]
#[command(version, about = "Photo adjustment and RAW ingestion tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply adjustments to an image and export the result
    Edit {
        /// Input file (JPEG, PNG, TIFF, or a supported RAW format)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (defaults to <input>_edited.<ext>)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// YAML edit file; command-line flags override its values
        #[arg(long, value_name = "FILE")]
        edit_file: Option<PathBuf>,

        /// Write the effective descriptor (file plus flag overrides) as YAML
        #[arg(long, value_name = "FILE")]
        save_edit: Option<PathBuf>,

        /// Exposure in stops [-2, 2]
        #[arg(long, value_name = "FLOAT")]
        exposure: Option<f32>,

        /// Contrast [-100, 100]
        #[arg(long, value_name = "FLOAT")]
        contrast: Option<f32>,

        /// Highlight recovery [-100, 100]
        #[arg(long, value_name = "FLOAT")]
        highlights: Option<f32>,

        /// Shadow lift [-100, 100]
        #[arg(long, value_name = "FLOAT")]
        shadows: Option<f32>,

        /// White point [-100, 100]
        #[arg(long, value_name = "FLOAT")]
        whites: Option<f32>,

        /// Black point [-100, 100]
        #[arg(long, value_name = "FLOAT")]
        blacks: Option<f32>,

        /// Vibrance [-100, 100]
        #[arg(long, value_name = "FLOAT")]
        vibrance: Option<f32>,

        /// Saturation [-100, 100]
        #[arg(long, value_name = "FLOAT")]
        saturation: Option<f32>,

        /// Hue rotation in degrees [-180, 180]
        #[arg(long, value_name = "FLOAT")]
        hue: Option<f32>,

        /// Color temperature (positive warms, negative cools)
        #[arg(long, value_name = "FLOAT")]
        temperature: Option<f32>,

        /// Tint (positive toward green, negative toward magenta)
        #[arg(long, value_name = "FLOAT")]
        tint: Option<f32>,

        /// Local contrast [-100, 100]
        #[arg(long, value_name = "FLOAT")]
        clarity: Option<f32>,

        /// Vignette strength [-100, 100]; positive brightens edges
        #[arg(long, value_name = "FLOAT")]
        vignetting: Option<f32>,

        /// Grain amount [0, 100]
        #[arg(long, value_name = "FLOAT")]
        grain: Option<f32>,

        /// Quick action preset: none, bw, vintage, portrait, landscape
        #[arg(long, value_name = "NAME")]
        quick_action: Option<String>,

        /// Mirror left-right
        #[arg(long)]
        flip_horizontal: bool,

        /// Mirror top-bottom
        #[arg(long)]
        flip_vertical: bool,

        /// Clockwise rotation: 0, 90, 180, or 270
        #[arg(long, value_name = "DEG")]
        rotate: Option<String>,

        /// Export a side-by-side comparison; columns left of SPLIT [0.0, 1.0]
        /// keep the unedited source
        #[arg(long, value_name = "SPLIT")]
        compare: Option<String>,

        /// Export format (png, jpeg, or tiff16)
        #[arg(long, value_name = "FORMAT", default_value = "png")]
        export: String,

        /// Lossy quality factor [0.0, 1.0]
        #[arg(long, value_name = "FLOAT", default_value = "0.9")]
        quality: f32,

        /// Enable debug output
        #[arg(long)]
        debug: bool,
    },

    /// Decode a RAW file and report which strategy produced the preview
    Ingest {
        /// Input RAW file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Save the decoded preview as PNG
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Enable debug output
        #[arg(long)]
        debug: bool,
    },

    /// List the supported RAW formats
    Formats,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Edit {
            input,
            out,
            edit_file,
            save_edit,
            exposure,
            contrast,
            highlights,
            shadows,
            whites,
            blacks,
            vibrance,
            saturation,
            hue,
            temperature,
            tint,
            clarity,
            vignetting,
            grain,
            quick_action,
            flip_horizontal,
            flip_vertical,
            rotate,
            compare,
            export,
            quality,
            debug,
        } => cmd_edit(EditArgs {
            input,
            out,
            edit_file,
            save_edit,
            exposure,
            contrast,
            highlights,
            shadows,
            whites,
            blacks,
            vibrance,
            saturation,
            hue,
            temperature,
            tint,
            clarity,
            vignetting,
            grain,
            quick_action,
            flip_horizontal,
            flip_vertical,
            rotate,
            compare,
            export,
            quality,
            debug,
        }),

        Commands::Ingest { input, out, debug } => cmd_ingest(input, out, debug),

        Commands::Formats => cmd_formats(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct EditArgs {
    input: PathBuf,
    out: Option<PathBuf>,
    edit_file: Option<PathBuf>,
    save_edit: Option<PathBuf>,
    exposure: Option<f32>,
    contrast: Option<f32>,
    highlights: Option<f32>,
    shadows: Option<f32>,
    whites: Option<f32>,
    blacks: Option<f32>,
    vibrance: Option<f32>,
    saturation: Option<f32>,
    hue: Option<f32>,
    temperature: Option<f32>,
    tint: Option<f32>,
    clarity: Option<f32>,
    vignetting: Option<f32>,
    grain: Option<f32>,
    quick_action: Option<String>,
    flip_horizontal: bool,
    flip_vertical: bool,
    rotate: Option<String>,
    compare: Option<String>,
    export: String,
    quality: f32,
    debug: bool,
}

fn cmd_edit(args: EditArgs) -> Result<(), String> {
    revela_core::config::set_verbose(args.debug);

    let format = parse_export_format(&args.export, args.quality)?;

    // Start from the edit file if given, then let flags override
    let mut edit = base_descriptor(args.edit_file.as_deref())?;
    apply_flag_overrides(&mut edit, &args)?;

    if let Some(path) = &args.save_edit {
        save_edit_file(&edit, path)?;
        println!("Saved edit to {}", path.display());
    }

    println!("Decoding {}...", args.input.display());
    let decoded = decode_file(&args.input).map_err(|e| e.to_string())?;
    if let Some(raw) = &decoded.raw {
        println!(
            "RAW source decoded via {} ({:?} quality)",
            raw.strategy.name(),
            raw.quality
        );
    }

    println!(
        "Processing {}x{}...",
        decoded.buffer.width(),
        decoded.buffer.height()
    );
    let processed = process_image(&decoded.buffer, &edit);

    let final_image = match &args.compare {
        Some(raw) => {
            let split = parse_split(raw)?;
            before_after_composite(&decoded.buffer, &processed, split)
        }
        None => processed,
    };

    let output = match args.out {
        Some(path) => path,
        None => determine_output_path(&args.input, None, format.extension())?,
    };
    export_image(&final_image, &output, format).map_err(|e| e.to_string())?;
    println!("Wrote {}", output.display());
    Ok(())
}

fn apply_flag_overrides(edit: &mut EditDescriptor, args: &EditArgs) -> Result<(), String> {
    if let Some(v) = args.exposure {
        edit.exposure = v;
    }
    if let Some(v) = args.contrast {
        edit.contrast = v;
    }
    if let Some(v) = args.highlights {
        edit.highlights = v;
    }
    if let Some(v) = args.shadows {
        edit.shadows = v;
    }
    if let Some(v) = args.whites {
        edit.whites = v;
    }
    if let Some(v) = args.blacks {
        edit.blacks = v;
    }
    if let Some(v) = args.vibrance {
        edit.vibrance = v;
    }
    if let Some(v) = args.saturation {
        edit.saturation = v;
    }
    if let Some(v) = args.hue {
        edit.hue = v;
    }
    if let Some(v) = args.temperature {
        edit.temperature = v;
    }
    if let Some(v) = args.tint {
        edit.tint = v;
    }
    if let Some(v) = args.clarity {
        edit.clarity = v;
    }
    if let Some(v) = args.vignetting {
        edit.vignetting = v;
    }
    if let Some(v) = args.grain {
        edit.grain_amount = v;
    }
    if let Some(name) = &args.quick_action {
        edit.quick_action = name.parse::<QuickAction>()?;
    }
    if args.flip_horizontal {
        edit.flip_horizontal = true;
    }
    if args.flip_vertical {
        edit.flip_vertical = true;
    }
    if let Some(deg) = &args.rotate {
        edit.rotation = deg.parse::<Rotation>()?;
    }
    Ok(())
}

fn cmd_ingest(input: PathBuf, out: Option<PathBuf>, debug: bool) -> Result<(), String> {
    revela_core::config::set_verbose(debug);

    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("Invalid path: {}", input.display()))?
        .to_string();
    let bytes = fs::read(&input).map_err(|e| format!("Failed to read {}: {}", input.display(), e))?;

    let mut asset = RawAsset::new(file_name, bytes);
    let result = asset.ingest().map_err(|e| e.to_string())?;

    println!("{}", result.label);
    println!("  strategy: {}", result.strategy.name());
    println!("  quality:  {:?}", result.quality);
    println!(
        "  size:     {}x{}",
        result.preview.width, result.preview.height
    );
    if !result.attempts.is_empty() {
        println!("  fallbacks before success:");
        for attempt in &result.attempts {
            println!("    {} failed: {}", attempt.strategy.name(), attempt.error);
        }
    }

    if let Some(path) = out {
        let buffer = revela_core::PixelBuffer::from(result.preview.clone());
        export_image(&buffer, &path, revela_core::ExportFormat::Png)
            .map_err(|e| e.to_string())?;
        println!("Wrote preview to {}", path.display());
    }
    Ok(())
}

fn cmd_formats() -> Result<(), String> {
    println!("{:<8} {:<12} DESCRIPTION", "EXT", "BRAND");
    for info in RAW_FORMATS {
        println!(
            "{:<8} {:<12} {}",
            info.extension, info.brand, info.description
        );
    }
    Ok(())
}
