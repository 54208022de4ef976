//! Local contrast ("clarity")
//!
//! Unsharp masking against the 7x7 local mean: each interior pixel moves
//! away from (or toward, for negative strength) its neighborhood average.
//! Border pixels within the window radius of any edge are left unmodified;
//! that boundary simplification is part of the numeric contract.
//!
//! The window mean is recomputed per pixel, O(width x height x 49). Rows are
//! processed in parallel; a separable or integral-image mean would be a
//! drop-in replacement since only floating rounding could differ.

use rayon::prelude::*;

use crate::tone::clamp255;

const RADIUS: usize = 3;
const WINDOW_AREA: f32 = ((2 * RADIUS + 1) * (2 * RADIUS + 1)) as f32;

/// Apply local contrast to an RGBA byte buffer in place.
///
/// `clarity` is the -100..100 descriptor parameter; 0 is a no-op. Images
/// too small to contain any interior pixel pass through untouched.
pub fn apply_clarity(data: &mut [u8], width: u32, height: u32, clarity: f32) {
    if clarity == 0.0 {
        return;
    }

    let w = width as usize;
    let h = height as usize;
    if w <= 2 * RADIUS || h <= 2 * RADIUS {
        return;
    }

    let strength = clarity / 100.0;
    // The mean must come from the pre-clarity image, never from rows the
    // pass has already rewritten
    let src = data.to_vec();

    data.par_chunks_mut(w * 4)
        .enumerate()
        .for_each(|(y, row)| {
            if y < RADIUS || y >= h - RADIUS {
                return;
            }
            for x in RADIUS..w - RADIUS {
                let mut sum = [0.0f32; 3];
                for wy in y - RADIUS..=y + RADIUS {
                    for wx in x - RADIUS..=x + RADIUS {
                        let idx = (wy * w + wx) * 4;
                        sum[0] += src[idx] as f32;
                        sum[1] += src[idx + 1] as f32;
                        sum[2] += src[idx + 2] as f32;
                    }
                }

                let idx = (y * w + x) * 4;
                for c in 0..3 {
                    let mean = sum[c] / WINDOW_AREA;
                    let ch = src[idx + c] as f32;
                    row[x * 4 + c] = clamp255(ch + (ch - mean) * strength) as u8;
                }
            }
        });
}
