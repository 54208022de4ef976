//! Edit descriptor and related option types
//!
//! An [`EditDescriptor`] is a flat record of adjustment parameters. Every
//! field's default is a semantic no-op, so a descriptor deserialized from a
//! file with missing fields behaves exactly like one that never mentioned
//! them, and the pipeline can skip any stage whose parameters are still at
//! their defaults.

use serde::{Deserialize, Serialize};

/// Default film grain seed. Grain must be reproducible run to run; callers
/// wanting varied grain supply their own seed.
pub const DEFAULT_GRAIN_SEED: u64 = 0x5EED_BA5E;

/// Named quick-look preset. Mutually exclusive per run; composes with all
/// other stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickAction {
    #[default]
    None,
    Bw,
    Vintage,
    Portrait,
    Landscape,
}

impl std::str::FromStr for QuickAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "bw" | "b&w" | "monochrome" => Ok(Self::Bw),
            "vintage" => Ok(Self::Vintage),
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            _ => Err(format!("Unknown quick action: {}", s)),
        }
    }
}

/// Quarter-turn rotation applied before any color math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    None,
    Cw90,
    Cw180,
    Cw270,
}

impl std::str::FromStr for Rotation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::None),
            "90" => Ok(Self::Cw90),
            "180" => Ok(Self::Cw180),
            "270" => Ok(Self::Cw270),
            _ => Err(format!("Rotation must be 0, 90, 180 or 270, got: {}", s)),
        }
    }
}

/// Sparse, immutable description of one edit.
///
/// All numeric parameters are clamped into their documented ranges by
/// [`EditDescriptor::sanitized`]; out-of-range input is never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditDescriptor {
    /// Exposure in stops, -2.0 to 2.0
    pub exposure: f32,

    /// Contrast, -100 to 100
    pub contrast: f32,

    /// Highlight recovery, -100 to 100
    pub highlights: f32,

    /// Shadow lift, -100 to 100
    pub shadows: f32,

    /// White point expansion, -100 to 100
    pub whites: f32,

    /// Black point contraction, -100 to 100
    pub blacks: f32,

    /// Tone curve highlight zone, -100 to 100
    pub curve_highlights: f32,

    /// Tone curve light zone, -100 to 100
    pub curve_lights: f32,

    /// Tone curve dark zone, -100 to 100
    pub curve_darks: f32,

    /// Tone curve shadow zone, -100 to 100
    pub curve_shadows: f32,

    /// Skin-tone-aware saturation boost, -100 to 100
    pub vibrance: f32,

    /// Flat saturation shift, -100 to 100
    pub saturation: f32,

    /// Hue rotation in degrees, -180 to 180
    pub hue: f32,

    /// White balance temperature, practical range -100 to 100
    pub temperature: f32,

    /// White balance tint, practical range -100 to 100
    pub tint: f32,

    /// Red channel luminance bias, -100 to 100
    pub red_luminance: f32,

    /// Green channel luminance bias, -100 to 100
    pub green_luminance: f32,

    /// Blue channel luminance bias, -100 to 100
    pub blue_luminance: f32,

    /// Local contrast strength, -100 to 100
    pub clarity: f32,

    /// Vignette strength, -100 to 100
    pub vignetting: f32,

    /// Vignette onset as percent of center distance, 0 to 100
    pub vignette_midpoint: f32,

    /// Film grain amount, 0 to 100
    pub grain_amount: f32,

    /// Film grain size multiplier, unbounded
    pub grain_size: f32,

    /// Seed for the grain noise; fixed default keeps output reproducible
    pub grain_seed: u64,

    /// Named quick-look preset
    pub quick_action: QuickAction,

    /// Mirror horizontally before pixel sampling
    pub flip_horizontal: bool,

    /// Mirror vertically before pixel sampling
    pub flip_vertical: bool,

    /// Quarter-turn rotation before pixel sampling
    pub rotation: Rotation,
}

impl Default for EditDescriptor {
    fn default() -> Self {
        Self {
            exposure: 0.0,
            contrast: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            whites: 0.0,
            blacks: 0.0,
            curve_highlights: 0.0,
            curve_lights: 0.0,
            curve_darks: 0.0,
            curve_shadows: 0.0,
            vibrance: 0.0,
            saturation: 0.0,
            hue: 0.0,
            temperature: 0.0,
            tint: 0.0,
            red_luminance: 0.0,
            green_luminance: 0.0,
            blue_luminance: 0.0,
            clarity: 0.0,
            vignetting: 0.0,
            vignette_midpoint: 50.0,
            grain_amount: 0.0,
            grain_size: 25.0,
            grain_seed: DEFAULT_GRAIN_SEED,
            quick_action: QuickAction::None,
            flip_horizontal: false,
            flip_vertical: false,
            rotation: Rotation::None,
        }
    }
}

impl EditDescriptor {
    /// True when every parameter is at its no-op default. Note that
    /// `vignette_midpoint`, `grain_size` and `grain_seed` do not count:
    /// they only shape stages that are off at their own defaults.
    pub fn is_noop(&self) -> bool {
        !self.has_geometry()
            && self.quick_action == QuickAction::None
            && !self.has_white_balance()
            && !self.has_tone()
            && !self.has_color()
            && self.clarity == 0.0
            && self.vignetting == 0.0
            && self.grain_amount == 0.0
    }

    pub fn has_geometry(&self) -> bool {
        self.flip_horizontal || self.flip_vertical || self.rotation != Rotation::None
    }

    pub fn has_white_balance(&self) -> bool {
        self.temperature != 0.0 || self.tint != 0.0
    }

    /// Any tone stage active (exposure through tone curve).
    pub fn has_tone(&self) -> bool {
        self.exposure != 0.0
            || self.highlights != 0.0
            || self.shadows != 0.0
            || self.whites != 0.0
            || self.blacks != 0.0
            || self.contrast != 0.0
            || self.has_tone_curve()
    }

    pub fn has_tone_curve(&self) -> bool {
        self.curve_highlights != 0.0
            || self.curve_lights != 0.0
            || self.curve_darks != 0.0
            || self.curve_shadows != 0.0
    }

    /// Any color stage active (vibrance, saturation, hue, channel luminance).
    pub fn has_color(&self) -> bool {
        self.has_hsl_stage()
            || self.red_luminance != 0.0
            || self.green_luminance != 0.0
            || self.blue_luminance != 0.0
    }

    /// Any stage that needs the HSL round trip.
    pub fn has_hsl_stage(&self) -> bool {
        self.vibrance != 0.0 || self.saturation != 0.0 || self.hue != 0.0
    }

    /// Clamp every parameter into its documented range. The pipeline never
    /// rejects numeric input; it sanitizes and proceeds.
    pub fn sanitized(&self) -> Self {
        let mut d = self.clone();
        d.exposure = d.exposure.clamp(-2.0, 2.0);
        d.contrast = d.contrast.clamp(-100.0, 100.0);
        d.highlights = d.highlights.clamp(-100.0, 100.0);
        d.shadows = d.shadows.clamp(-100.0, 100.0);
        d.whites = d.whites.clamp(-100.0, 100.0);
        d.blacks = d.blacks.clamp(-100.0, 100.0);
        d.curve_highlights = d.curve_highlights.clamp(-100.0, 100.0);
        d.curve_lights = d.curve_lights.clamp(-100.0, 100.0);
        d.curve_darks = d.curve_darks.clamp(-100.0, 100.0);
        d.curve_shadows = d.curve_shadows.clamp(-100.0, 100.0);
        d.vibrance = d.vibrance.clamp(-100.0, 100.0);
        d.saturation = d.saturation.clamp(-100.0, 100.0);
        d.hue = d.hue.clamp(-180.0, 180.0);
        d.red_luminance = d.red_luminance.clamp(-100.0, 100.0);
        d.green_luminance = d.green_luminance.clamp(-100.0, 100.0);
        d.blue_luminance = d.blue_luminance.clamp(-100.0, 100.0);
        d.clarity = d.clarity.clamp(-100.0, 100.0);
        d.vignetting = d.vignetting.clamp(-100.0, 100.0);
        d.vignette_midpoint = d.vignette_midpoint.clamp(0.0, 100.0);
        d.grain_amount = d.grain_amount.clamp(0.0, 100.0);
        // temperature, tint and grain_size have no hard bounds
        d
    }
}
