//! Tonal adjustments
//!
//! Exposure, highlight/shadow recovery, white/black point, contrast and the
//! zoned tone curve. All functions take channel values in 0.0-255.0 and
//! clamp after every arithmetic step so overflow never leaks curvature into
//! the next stage.

/// Rec. 601 luminance weights over 8-bit channels.
pub(crate) const LUMA_REC601: [f32; 3] = [0.299, 0.587, 0.114];

/// Contribution scale shared by all four tone-curve zones.
const ZONE_WEIGHT: f32 = 0.3;

#[inline]
pub(crate) fn clamp255(v: f32) -> f32 {
    v.clamp(0.0, 255.0)
}

/// Luminance of a pixel, normalized to 0.0-1.0.
#[inline]
pub(crate) fn luminance01(rgb: [f32; 3]) -> f32 {
    (LUMA_REC601[0] * rgb[0] + LUMA_REC601[1] * rgb[1] + LUMA_REC601[2] * rgb[2]) / 255.0
}

/// Multiply each channel by `2^exposure` (exposure in stops).
///
/// `exposure = 0.0` produces no change.
pub fn apply_exposure(rgb: [f32; 3], exposure: f32) -> [f32; 3] {
    if exposure == 0.0 {
        return rgb;
    }
    let factor = 2f32.powf(exposure);
    rgb.map(|ch| clamp255(ch * factor))
}

/// Scale bright pixels by the highlight parameter and dark pixels by the
/// shadow parameter. Both factors are computed from the same pre-stage
/// luminance and applied independently.
pub fn apply_highlights_shadows(rgb: [f32; 3], highlights: f32, shadows: f32) -> [f32; 3] {
    if highlights == 0.0 && shadows == 0.0 {
        return rgb;
    }

    let lum = luminance01(rgb);
    let mut out = rgb;

    if highlights != 0.0 && lum > 0.6 {
        let factor = 1.0 + highlights / 100.0 * (lum - 0.6) * 2.5;
        out = out.map(|ch| clamp255(ch * factor));
    }
    if shadows != 0.0 && lum < 0.4 {
        let factor = 1.0 + shadows / 100.0 * (0.4 - lum) * 2.5;
        out = out.map(|ch| clamp255(ch * factor));
    }
    out
}

/// `whites` expands the upper range, `blacks` contracts the lower range.
pub fn apply_whites_blacks(rgb: [f32; 3], whites: f32, blacks: f32) -> [f32; 3] {
    let mut out = rgb;
    if whites != 0.0 {
        let divisor = 1.0 + whites / 100.0 * 0.5;
        out = out.map(|ch| clamp255(255.0 - (255.0 - ch) / divisor));
    }
    if blacks != 0.0 {
        let divisor = 1.0 + blacks / 100.0 * 0.5;
        out = out.map(|ch| clamp255(ch / divisor));
    }
    out
}

/// Linear contrast pivoted at mid-gray.
pub fn apply_contrast(rgb: [f32; 3], contrast: f32) -> [f32; 3] {
    if contrast == 0.0 {
        return rgb;
    }
    let factor = 1.0 + contrast / 100.0;
    rgb.map(|ch| clamp255(((ch / 255.0 - 0.5) * factor + 0.5) * 255.0))
}

/// Four range-gated tone-curve zones, each nudging the normalized value by
/// `(param/100) * distance_into_zone * ZONE_WEIGHT`.
///
/// Zones overlap (shadows/darks over 0.1-0.3, darks/lights at 0.3-0.5 edge,
/// lights/highlights over 0.7) and their contributions are additive, not
/// exclusive. That additive overlap is part of the numeric contract and is
/// covered by a regression test; do not make the zones exclusive.
pub fn apply_tone_curve(
    rgb: [f32; 3],
    curve_shadows: f32,
    curve_darks: f32,
    curve_lights: f32,
    curve_highlights: f32,
) -> [f32; 3] {
    if curve_shadows == 0.0 && curve_darks == 0.0 && curve_lights == 0.0 && curve_highlights == 0.0
    {
        return rgb;
    }

    rgb.map(|ch| {
        let v = ch / 255.0;
        let mut delta = 0.0;

        // Shadows: below 0.3, ramping up toward black
        if v < 0.3 {
            delta += curve_shadows / 100.0 * ((0.3 - v) / 0.3) * ZONE_WEIGHT;
        }
        // Darks: 0.1-0.5, triangular ramp peaking at 0.3
        if (0.1..=0.5).contains(&v) {
            delta += curve_darks / 100.0 * (1.0 - (v - 0.3).abs() / 0.2) * ZONE_WEIGHT;
        }
        // Lights: 0.3-0.7, triangular ramp peaking at 0.5
        if (0.3..=0.7).contains(&v) {
            delta += curve_lights / 100.0 * (1.0 - (v - 0.5).abs() / 0.2) * ZONE_WEIGHT;
        }
        // Highlights: above 0.7, ramping up toward white
        if v > 0.7 {
            delta += curve_highlights / 100.0 * ((v - 0.7) / 0.3) * ZONE_WEIGHT;
        }

        clamp255((v + delta) * 255.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposure_zero_is_identity() {
        let rgb = [10.0, 128.0, 250.0];
        assert_eq!(apply_exposure(rgb, 0.0), rgb);
    }

    #[test]
    fn test_exposure_one_stop_doubles() {
        let out = apply_exposure([60.0, 100.0, 128.0], 1.0);
        assert!((out[0] - 120.0).abs() < 1e-3);
        assert!((out[1] - 200.0).abs() < 1e-3);
        assert_eq!(out[2], 255.0); // 256 clamps
    }

    #[test]
    fn test_exposure_is_monotonic() {
        let rgb = [40.0, 90.0, 180.0];
        let mut prev = apply_exposure(rgb, -2.0);
        let mut stops = -2.0f32;
        while stops <= 2.0 {
            let cur = apply_exposure(rgb, stops);
            for c in 0..3 {
                assert!(
                    cur[c] >= prev[c] - 1e-4,
                    "channel {} decreased at {} stops",
                    c,
                    stops
                );
            }
            prev = cur;
            stops += 0.25;
        }
    }

    #[test]
    fn test_highlights_only_touch_bright_pixels() {
        let dark = [40.0, 40.0, 40.0];
        let bright = [220.0, 220.0, 220.0];
        // lum(dark) < 0.4 so highlights leave it alone
        assert_eq!(apply_highlights_shadows(dark, -50.0, 0.0), dark);
        let out = apply_highlights_shadows(bright, -50.0, 0.0);
        assert!(out[0] < bright[0]);
    }

    #[test]
    fn test_shadows_lift_dark_pixels() {
        let dark = [40.0, 40.0, 40.0];
        let out = apply_highlights_shadows(dark, 0.0, 50.0);
        assert!(out[0] > dark[0]);
    }

    #[test]
    fn test_whites_expand_upper_range() {
        let out = apply_whites_blacks([200.0, 200.0, 200.0], 50.0, 0.0);
        // 255 - 55/1.25 = 211
        assert!((out[0] - 211.0).abs() < 1e-3);
    }

    #[test]
    fn test_blacks_contract_lower_range() {
        let out = apply_whites_blacks([50.0, 50.0, 50.0], 0.0, 50.0);
        // 50 / 1.25 = 40
        assert!((out[0] - 40.0).abs() < 1e-3);
    }

    #[test]
    fn test_contrast_pivot_is_near_fixed() {
        // 128/255 sits a hair above the 0.5 pivot; full contrast moves it
        // by less than one code value
        let out = apply_contrast([128.0, 128.0, 128.0], 100.0);
        assert!((out[0] - 128.0).abs() < 1.0);
    }

    #[test]
    fn test_contrast_spreads_extremes() {
        let out = apply_contrast([64.0, 192.0, 128.0], 50.0);
        assert!(out[0] < 64.0);
        assert!(out[1] > 192.0);
    }

    #[test]
    fn test_tone_curve_zone_overlap_is_additive() {
        // v = 0.2 is inside both the shadows gate (<0.3) and the darks gate
        // (0.1-0.5); the result must carry both contributions
        let v = 0.2 * 255.0;
        let both = apply_tone_curve([v; 3], 40.0, 40.0, 0.0, 0.0);
        let only_shadows = apply_tone_curve([v; 3], 40.0, 0.0, 0.0, 0.0);
        let only_darks = apply_tone_curve([v; 3], 0.0, 40.0, 0.0, 0.0);
        let sum = only_shadows[0] + only_darks[0] - v;
        assert!(
            (both[0] - sum).abs() < 1e-3,
            "overlapping zones must add: {} vs {}",
            both[0],
            sum
        );
    }

    #[test]
    fn test_tone_curve_gates() {
        // Deep shadow pixel is outside the lights and highlights gates
        let deep = [0.05 * 255.0; 3];
        assert_eq!(apply_tone_curve(deep, 0.0, 0.0, 80.0, 80.0), deep);
        // Bright pixel is outside the shadows and darks gates
        let bright = [0.9 * 255.0; 3];
        assert_eq!(apply_tone_curve(bright, 80.0, 80.0, 0.0, 0.0), bright);
    }
}
