//! Color space conversions
//!
//! RGB <-> HSL primitives used by the adjustment pipeline. Hue is stored in
//! turns (0.0-1.0) rather than degrees so hue arithmetic and the skin-tone
//! band checks are plain float comparisons.

/// HSL color representation
/// - H (hue): 0.0-1.0 turns
/// - S (saturation): 0.0-1.0
/// - L (lightness): 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Convert normalized RGB (0.0-1.0) to HSL.
#[inline]
pub fn rgb_to_hsl_f(r: f32, g: f32, b: f32) -> Hsl {
    let r = r.clamp(0.0, 1.0);
    let g = g.clamp(0.0, 1.0);
    let b = b.clamp(0.0, 1.0);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    // Lightness
    let l = (max + min) / 2.0;

    // Achromatic case
    if delta < 1e-6 {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    // Saturation
    let s = if l < 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    // Hue by dominant sector
    let h = if (max - r).abs() < 1e-6 {
        let mut h = (g - b) / delta;
        if g < b {
            h += 6.0;
        }
        h / 6.0
    } else if (max - g).abs() < 1e-6 {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };

    Hsl { h: h % 1.0, s, l }
}

/// Convert HSL back to normalized RGB (0.0-1.0).
#[inline]
pub fn hsl_to_rgb_f(hsl: Hsl) -> (f32, f32, f32) {
    let Hsl { h, s, l } = hsl;
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    // Achromatic case
    if s < 1e-6 {
        return (l, l, l);
    }

    let h = h.rem_euclid(1.0);

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    (r, g, b)
}

/// Convert 8-bit RGB to HSL.
#[inline]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    rgb_to_hsl_f(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

/// Convert HSL to 8-bit RGB.
#[inline]
pub fn hsl_to_rgb(hsl: Hsl) -> (u8, u8, u8) {
    let (r, g, b) = hsl_to_rgb_f(hsl);
    (
        (r * 255.0).round().clamp(0.0, 255.0) as u8,
        (g * 255.0).round().clamp(0.0, 255.0) as u8,
        (b * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

/// Helper function for HSL to RGB conversion
#[inline]
fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
