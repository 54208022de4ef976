//! Color adjustments
//!
//! White balance, vibrance, saturation, hue rotation and per-channel
//! luminance bias. The HSL-based stages share one RGB->HSL->RGB round trip
//! per pixel, applied in pipeline stage order (vibrance, saturation, hue).

use crate::color::{hsl_to_rgb_f, rgb_to_hsl_f};
use crate::tone::clamp255;

/// Hue band treated as skin tones, in turns.
pub(crate) const SKIN_HUE_MIN: f32 = 0.05;
pub(crate) const SKIN_HUE_MAX: f32 = 0.15;

/// Saturation boost multiplier inside the skin band.
const SKIN_PROTECTION: f32 = 0.3;

/// Temperature shifts red up and blue down; tint shifts green up with the
/// opposing shift split symmetrically across red and blue.
pub fn apply_white_balance(rgb: [f32; 3], temperature: f32, tint: f32) -> [f32; 3] {
    let mut out = rgb;

    if temperature != 0.0 {
        let shift = temperature / 2000.0 * 30.0;
        out[0] = clamp255(out[0] + shift);
        out[2] = clamp255(out[2] - shift);
    }
    if tint != 0.0 {
        let shift = tint / 150.0;
        out[1] = clamp255(out[1] + shift);
        out[0] = clamp255(out[0] - shift / 2.0);
        out[2] = clamp255(out[2] - shift / 2.0);
    }
    out
}

/// Vibrance, flat saturation and hue rotation through a single HSL round
/// trip.
///
/// Vibrance boosts saturation proportionally more the less saturated the
/// pixel already is, and protects the skin-tone hue band so faces never
/// over-saturate ahead of the rest of the frame.
pub fn apply_hsl_stages(rgb: [f32; 3], vibrance: f32, saturation: f32, hue: f32) -> [f32; 3] {
    if vibrance == 0.0 && saturation == 0.0 && hue == 0.0 {
        return rgb;
    }

    let mut hsl = rgb_to_hsl_f(rgb[0] / 255.0, rgb[1] / 255.0, rgb[2] / 255.0);

    if vibrance != 0.0 {
        let protection = if hsl.h > SKIN_HUE_MIN && hsl.h < SKIN_HUE_MAX {
            SKIN_PROTECTION
        } else {
            1.0
        };
        let boost = vibrance / 100.0 * (1.0 - hsl.s) * protection;
        hsl.s = (hsl.s + boost).clamp(0.0, 1.0);
    }
    if saturation != 0.0 {
        hsl.s = (hsl.s + saturation / 100.0).clamp(0.0, 1.0);
    }
    if hue != 0.0 {
        hsl.h = (hsl.h + hue / 360.0).rem_euclid(1.0);
    }

    let (r, g, b) = hsl_to_rgb_f(hsl);
    [clamp255(r * 255.0), clamp255(g * 255.0), clamp255(b * 255.0)]
}

/// Per-channel luminance bias, weighted by each channel's share of the
/// pixel's total. The +1 in the divisor guards pure black.
pub fn apply_channel_luminance(rgb: [f32; 3], red: f32, green: f32, blue: f32) -> [f32; 3] {
    if red == 0.0 && green == 0.0 && blue == 0.0 {
        return rgb;
    }

    let total = rgb[0] + rgb[1] + rgb[2] + 1.0;
    let params = [red, green, blue];
    let mut out = rgb;
    for c in 0..3 {
        if params[c] != 0.0 {
            let weight = rgb[c] / total;
            out[c] = clamp255(out[c] + params[c] / 100.0 * weight * 50.0);
        }
    }
    out
}
