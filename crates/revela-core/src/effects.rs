//! Effects: quick-look presets, vignette and film grain
//!
//! Presets run per pixel inside the interleaved pipeline loop; vignette and
//! grain are whole-image passes because they need pixel coordinates.

use crate::color::{hsl_to_rgb_f, rgb_to_hsl_f};
use crate::color_adjust::{SKIN_HUE_MIN, SKIN_HUE_MAX};
use crate::models::QuickAction;
use crate::tone::{clamp255, LUMA_REC601};

/// Fixed channel-mixing matrix for the vintage look (sepia drift with a
/// strong blue roll-off).
const VINTAGE_MIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Fixed per-channel scalars for the landscape look, favoring green/blue.
const LANDSCAPE_SCALE: [f32; 3] = [0.95, 1.10, 1.05];

const PORTRAIT_SAT_BOOST: f32 = 1.15;
const PORTRAIT_LIGHT_BOOST: f32 = 1.08;

/// Apply a named quick-look preset to one pixel.
pub fn apply_quick_action(rgb: [f32; 3], action: QuickAction) -> [f32; 3] {
    match action {
        QuickAction::None => rgb,
        QuickAction::Bw => {
            let lum =
                LUMA_REC601[0] * rgb[0] + LUMA_REC601[1] * rgb[1] + LUMA_REC601[2] * rgb[2];
            [clamp255(lum); 3]
        }
        QuickAction::Vintage => {
            let mut out = [0.0f32; 3];
            for (c, row) in VINTAGE_MIX.iter().enumerate() {
                out[c] = clamp255(row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]);
            }
            out
        }
        QuickAction::Portrait => {
            let mut hsl = rgb_to_hsl_f(rgb[0] / 255.0, rgb[1] / 255.0, rgb[2] / 255.0);
            // Only the skin-hue band is touched; everything else passes through
            if hsl.h > SKIN_HUE_MIN && hsl.h < SKIN_HUE_MAX {
                hsl.s = (hsl.s * PORTRAIT_SAT_BOOST).clamp(0.0, 1.0);
                hsl.l = (hsl.l * PORTRAIT_LIGHT_BOOST).clamp(0.0, 1.0);
                let (r, g, b) = hsl_to_rgb_f(hsl);
                return [clamp255(r * 255.0), clamp255(g * 255.0), clamp255(b * 255.0)];
            }
            rgb
        }
        QuickAction::Landscape => [
            clamp255(rgb[0] * LANDSCAPE_SCALE[0]),
            clamp255(rgb[1] * LANDSCAPE_SCALE[1]),
            clamp255(rgb[2] * LANDSCAPE_SCALE[2]),
        ],
    }
}

/// Radial vignette, applied in place to an RGBA byte buffer.
///
/// `vignetting` and `vignette_midpoint` are the raw -100..100 / 0..100
/// descriptor parameters. Inside the midpoint radius nothing changes; past
/// it the factor ramps as `1 + strength * (dist - mid) / (1 - mid)`.
/// Positive strength makes the factor exceed 1.0, so edges brighten rather
/// than darken; negative strength darkens them.
pub fn apply_vignette(data: &mut [u8], width: u32, height: u32, vignetting: f32, midpoint: f32) {
    if vignetting == 0.0 || width == 0 || height == 0 {
        return;
    }

    let strength = vignetting / 100.0;
    let mid = (midpoint / 100.0).clamp(0.0, 1.0);
    if mid >= 1.0 {
        // Onset at the farthest corner: no pixel is past it
        return;
    }

    let cx = (width - 1) as f32 / 2.0;
    let cy = (height - 1) as f32 / 2.0;
    let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt() / max_dist;
            if dist <= mid {
                continue;
            }

            let factor = 1.0 + strength * ((dist - mid) / (1.0 - mid));
            let idx = ((y * width + x) * 4) as usize;
            for c in 0..3 {
                data[idx + c] = clamp255(data[idx + c] as f32 * factor) as u8;
            }
        }
    }
}

/// Monochromatic film grain, applied in place.
///
/// One noise delta per pixel, shared by all three channels. The noise is a
/// pure function of (seed, pixel index), so a run is bit-reproducible and
/// the pass could be parallelized without changing output.
pub fn apply_grain(data: &mut [u8], amount: f32, size: f32, seed: u64) {
    if amount == 0.0 || size == 0.0 {
        return;
    }

    let scale = amount / 100.0 * size;
    for (i, px) in data.chunks_exact_mut(4).enumerate() {
        let delta = grain_noise(seed, i as u64) * scale;
        for c in 0..3 {
            px[c] = clamp255(px[c] as f32 + delta) as u8;
        }
    }
}

/// Hash (seed, index) to a uniform float in (-1, 1). Splitmix64 finalizer.
fn grain_noise(seed: u64, index: u64) -> f32 {
    let mut x = seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    ((x >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bw_equalizes_channels() {
        let out = apply_quick_action([200.0, 100.0, 50.0], QuickAction::Bw);
        assert_eq!(out[0], out[1]);
        assert_eq!(out[1], out[2]);
        // 0.299*200 + 0.587*100 + 0.114*50 = 124.2
        assert!((out[0] - 124.2).abs() < 0.1);
    }

    #[test]
    fn test_vintage_pushes_warm() {
        let out = apply_quick_action([128.0, 128.0, 128.0], QuickAction::Vintage);
        assert!(out[0] > out[1]);
        assert!(out[1] > out[2]);
    }

    #[test]
    fn test_portrait_leaves_non_skin_alone() {
        // Teal is far outside the skin band
        let teal = [30.0, 180.0, 170.0];
        assert_eq!(apply_quick_action(teal, QuickAction::Portrait), teal);
    }

    #[test]
    fn test_portrait_boosts_skin_band() {
        // Warm orange-ish skin tone, hue around 0.08 turns
        let skin = [210.0, 150.0, 110.0];
        let before = rgb_to_hsl_f(skin[0] / 255.0, skin[1] / 255.0, skin[2] / 255.0);
        assert!(before.h > SKIN_HUE_MIN && before.h < SKIN_HUE_MAX);

        let out = apply_quick_action(skin, QuickAction::Portrait);
        let after = rgb_to_hsl_f(out[0] / 255.0, out[1] / 255.0, out[2] / 255.0);
        assert!(after.s > before.s);
        assert!(after.l > before.l);
    }

    #[test]
    fn test_landscape_favors_green_blue() {
        let out = apply_quick_action([100.0, 100.0, 100.0], QuickAction::Landscape);
        assert!(out[0] < 100.0);
        assert!(out[1] > 100.0);
        assert!(out[2] > 100.0);
    }

    fn gray_buffer(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![128u8; (width * height * 4) as usize];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        data
    }

    #[test]
    fn test_vignette_spares_center_past_midpoint() {
        let mut data = gray_buffer(21, 21);
        apply_vignette(&mut data, 21, 21, 60.0, 50.0);
        let center = ((10 * 21 + 10) * 4) as usize;
        assert_eq!(data[center], 128);
        // Positive strength brightens the corner
        assert!(data[0] > 128);
    }

    #[test]
    fn test_vignette_negative_darkens_edges() {
        let mut data = gray_buffer(21, 21);
        apply_vignette(&mut data, 21, 21, -60.0, 30.0);
        assert!(data[0] < 128);
    }

    #[test]
    fn test_grain_is_monochromatic_and_deterministic() {
        let mut a = gray_buffer(8, 8);
        let mut b = gray_buffer(8, 8);
        apply_grain(&mut a, 80.0, 25.0, 42);
        apply_grain(&mut b, 80.0, 25.0, 42);
        assert_eq!(a, b);

        for px in a.chunks_exact(4) {
            // Same delta on all channels from the same 128 base
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
            assert_eq!(px[3], 255);
        }
    }

    #[test]
    fn test_grain_seed_changes_pattern() {
        let mut a = gray_buffer(8, 8);
        let mut b = gray_buffer(8, 8);
        apply_grain(&mut a, 80.0, 25.0, 1);
        apply_grain(&mut b, 80.0, 25.0, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn test_grain_zero_amount_is_noop() {
        let mut data = gray_buffer(8, 8);
        let before = data.clone();
        apply_grain(&mut data, 0.0, 25.0, 42);
        assert_eq!(data, before);
    }

    #[test]
    fn test_grain_noise_range() {
        for i in 0..10_000u64 {
            let n = grain_noise(7, i);
            assert!((-1.0..1.0).contains(&n), "noise {} out of range", n);
        }
    }
}
