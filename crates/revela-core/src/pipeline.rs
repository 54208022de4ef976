//! Pixel adjustment pipeline
//!
//! Applies an [`EditDescriptor`] to a [`PixelBuffer`] in a fixed stage
//! order: geometry first (before any pixel sampling), then one interleaved
//! per-pixel loop covering preset, white balance, exposure,
//! highlights/shadows, whites/blacks, contrast, tone curve, vibrance,
//! saturation, hue and per-channel luminance, then the whole-image passes
//! for clarity, vignette and grain.
//!
//! Every stage preserves buffer dimensions and length; only channel values
//! change. A descriptor with all parameters at their defaults returns a
//! byte-identical copy through an explicit short-circuit.

use crate::clarity::apply_clarity;
use crate::color_adjust::{apply_channel_luminance, apply_hsl_stages, apply_white_balance};
use crate::effects::{apply_grain, apply_quick_action, apply_vignette};
use crate::error::RevelaError;
use crate::models::{EditDescriptor, QuickAction, Rotation};
use crate::tone::{
    apply_contrast, apply_exposure, apply_highlights_shadows, apply_tone_curve,
    apply_whites_blacks, clamp255,
};
use crate::verbose_println;

/// An RGBA raster. The data length invariant (`width * height * 4`) is
/// established at construction and holds through every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, validating the length contract.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, RevelaError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(RevelaError::InvalidBuffer {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Allocate an opaque black buffer.
    pub fn blank(width: u32, height: u32) -> Self {
        let mut data = vec![0u8; width as usize * height as usize * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA of the pixel at (x, y). Panics outside the image; callers
    /// iterate within bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

impl From<revela_raw::RawPreview> for PixelBuffer {
    fn from(preview: revela_raw::RawPreview) -> Self {
        // The ingestion chain upholds the same length invariant
        Self {
            width: preview.width,
            height: preview.height,
            data: preview.rgba,
        }
    }
}

/// Run the full pipeline. Infallible: numeric inputs are sanitized, never
/// rejected, and the buffer invariant is already established.
pub fn process_image(source: &PixelBuffer, edit: &EditDescriptor) -> PixelBuffer {
    let edit = edit.sanitized();

    // Fast path: the naive loop is O(W*H) per edit and this runs on every
    // interactive parameter change, so the all-defaults case must not touch
    // pixels at all.
    if edit.is_noop() {
        return source.clone();
    }

    let mut buffer = if edit.has_geometry() {
        apply_geometry(source, &edit)
    } else {
        source.clone()
    };

    let interleaved = edit.quick_action != QuickAction::None
        || edit.has_white_balance()
        || edit.has_tone()
        || edit.has_color();

    if interleaved {
        run_interleaved(&mut buffer, &edit);
        verbose_println!("[DEBUG] interleaved pass done ({}x{})", buffer.width, buffer.height);
    }

    if edit.clarity != 0.0 {
        apply_clarity(&mut buffer.data, buffer.width, buffer.height, edit.clarity);
        verbose_println!("[DEBUG] clarity pass done (strength {:.2})", edit.clarity);
    }
    if edit.vignetting != 0.0 {
        apply_vignette(
            &mut buffer.data,
            buffer.width,
            buffer.height,
            edit.vignetting,
            edit.vignette_midpoint,
        );
        verbose_println!("[DEBUG] vignette pass done (strength {:.2})", edit.vignetting);
    }
    if edit.grain_amount != 0.0 {
        apply_grain(
            &mut buffer.data,
            edit.grain_amount,
            edit.grain_size,
            edit.grain_seed,
        );
        verbose_println!("[DEBUG] grain pass done (amount {:.2})", edit.grain_amount);
    }

    buffer
}

/// Stages 1-11, one pass over every pixel. Alpha passes through untouched.
fn run_interleaved(buffer: &mut PixelBuffer, edit: &EditDescriptor) {
    for px in buffer.data.chunks_exact_mut(4) {
        let mut rgb = [px[0] as f32, px[1] as f32, px[2] as f32];

        rgb = apply_quick_action(rgb, edit.quick_action);
        rgb = apply_white_balance(rgb, edit.temperature, edit.tint);
        rgb = apply_exposure(rgb, edit.exposure);
        rgb = apply_highlights_shadows(rgb, edit.highlights, edit.shadows);
        rgb = apply_whites_blacks(rgb, edit.whites, edit.blacks);
        rgb = apply_contrast(rgb, edit.contrast);
        rgb = apply_tone_curve(
            rgb,
            edit.curve_shadows,
            edit.curve_darks,
            edit.curve_lights,
            edit.curve_highlights,
        );
        rgb = apply_hsl_stages(rgb, edit.vibrance, edit.saturation, edit.hue);
        rgb = apply_channel_luminance(
            rgb,
            edit.red_luminance,
            edit.green_luminance,
            edit.blue_luminance,
        );

        px[0] = clamp255(rgb[0]) as u8;
        px[1] = clamp255(rgb[1]) as u8;
        px[2] = clamp255(rgb[2]) as u8;
    }
}

/// Flips, then quarter-turn rotation. Runs once, before any color math.
fn apply_geometry(source: &PixelBuffer, edit: &EditDescriptor) -> PixelBuffer {
    let mut buffer = source.clone();

    if edit.flip_horizontal {
        let w = buffer.width as usize;
        for row in buffer.data.chunks_exact_mut(w * 4) {
            for x in 0..w / 2 {
                let (a, b) = (x * 4, (w - 1 - x) * 4);
                for c in 0..4 {
                    row.swap(a + c, b + c);
                }
            }
        }
    }
    if edit.flip_vertical {
        let row_len = buffer.width as usize * 4;
        let h = buffer.height as usize;
        for y in 0..h / 2 {
            let (top, bottom) = (y * row_len, (h - 1 - y) * row_len);
            for i in 0..row_len {
                buffer.data.swap(top + i, bottom + i);
            }
        }
    }

    match edit.rotation {
        Rotation::None => buffer,
        Rotation::Cw180 => {
            let mut data = buffer.data;
            let px_count = data.len() / 4;
            for i in 0..px_count / 2 {
                let (a, b) = (i * 4, (px_count - 1 - i) * 4);
                for c in 0..4 {
                    data.swap(a + c, b + c);
                }
            }
            PixelBuffer {
                width: buffer.width,
                height: buffer.height,
                data,
            }
        }
        Rotation::Cw90 | Rotation::Cw270 => {
            let (w, h) = (buffer.width, buffer.height);
            let mut data = vec![0u8; buffer.data.len()];
            for y in 0..h {
                for x in 0..w {
                    let (nx, ny) = match edit.rotation {
                        Rotation::Cw90 => (h - 1 - y, x),
                        _ => (y, w - 1 - x),
                    };
                    let src = ((y * w + x) * 4) as usize;
                    let dst = ((ny * h + nx) * 4) as usize;
                    data[dst..dst + 4].copy_from_slice(&buffer.data[src..src + 4]);
                }
            }
            PixelBuffer {
                width: h,
                height: w,
                data,
            }
        }
    }
}

/// Left/right comparison composite: columns left of `split` (0.0-1.0 of the
/// width) come from `before`, the rest from `after`. Falls back to a plain
/// copy of `after` when dimensions differ (geometry edits change them).
pub fn before_after_composite(before: &PixelBuffer, after: &PixelBuffer, split: f32) -> PixelBuffer {
    if before.width != after.width || before.height != after.height {
        return after.clone();
    }

    let split_col = ((split.clamp(0.0, 1.0)) * before.width as f32) as u32;
    let mut out = after.clone();
    let row_len = before.width as usize * 4;
    let keep = split_col as usize * 4;
    for (dst, src) in out
        .data
        .chunks_exact_mut(row_len)
        .zip(before.data.chunks_exact(row_len))
    {
        dst[..keep].copy_from_slice(&src[..keep]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32, value: u8) -> PixelBuffer {
        let mut data = vec![value; (width * height * 4) as usize];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        PixelBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn test_buffer_length_contract() {
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert!(matches!(err, RevelaError::InvalidBuffer { .. }));
    }

    #[test]
    fn test_defaults_are_byte_identical() {
        let src = gray(4, 4, 99);
        let out = process_image(&src, &EditDescriptor::default());
        assert_eq!(out, src);
    }

    #[test]
    fn test_contrast_on_midgray_is_noop() {
        // ((128/255 - 0.5) * 2 + 0.5) * 255 truncates back to 128
        let src = gray(2, 2, 128);
        let mut edit = EditDescriptor::default();
        edit.contrast = 100.0;
        let out = process_image(&src, &edit);
        for px in out.data().chunks_exact(4) {
            assert_eq!(&px[..3], &[128, 128, 128]);
        }
    }

    #[test]
    fn test_one_stop_exposure_saturates_midgray() {
        let src = gray(2, 2, 128);
        let mut edit = EditDescriptor::default();
        edit.exposure = 1.0;
        let out = process_image(&src, &edit);
        for px in out.data().chunks_exact(4) {
            assert_eq!(&px[..3], &[255, 255, 255]);
        }
    }

    #[test]
    fn test_dimensions_survive_color_stages() {
        let src = gray(7, 5, 80);
        let mut edit = EditDescriptor::default();
        edit.exposure = 0.7;
        edit.vibrance = 40.0;
        edit.clarity = 30.0;
        edit.vignetting = -40.0;
        edit.grain_amount = 20.0;
        let out = process_image(&src, &edit);
        assert_eq!(out.width(), 7);
        assert_eq!(out.height(), 5);
        assert_eq!(out.data().len(), src.data().len());
    }

    #[test]
    fn test_alpha_is_preserved() {
        let mut data = vec![100u8; 16];
        data[3] = 17;
        data[7] = 200;
        let src = PixelBuffer::new(2, 2, data).unwrap();
        let mut edit = EditDescriptor::default();
        edit.exposure = 1.5;
        edit.saturation = 50.0;
        let out = process_image(&src, &edit);
        assert_eq!(out.data()[3], 17);
        assert_eq!(out.data()[7], 200);
    }

    #[test]
    fn test_rotation_90_transposes_dimensions() {
        let mut src = gray(3, 2, 10);
        // Mark top-left red
        src.data[0] = 250;
        let mut edit = EditDescriptor::default();
        edit.rotation = Rotation::Cw90;
        let out = process_image(&src, &edit);
        assert_eq!(out.width(), 2);
        assert_eq!(out.height(), 3);
        // Top-left goes to top-right under a clockwise quarter turn
        assert_eq!(out.pixel(1, 0)[0], 250);
    }

    #[test]
    fn test_flip_horizontal_mirrors() {
        let mut src = gray(3, 1, 10);
        src.data[0] = 200;
        let mut edit = EditDescriptor::default();
        edit.flip_horizontal = true;
        let out = process_image(&src, &edit);
        assert_eq!(out.pixel(2, 0)[0], 200);
        assert_eq!(out.pixel(0, 0)[0], 10);
    }

    #[test]
    fn test_rotation_180_equals_double_flip() {
        let mut src = gray(4, 3, 30);
        src.data[0] = 211;
        src.data[((2 * 4 + 1) * 4) as usize] = 99;

        let mut rot = EditDescriptor::default();
        rot.rotation = Rotation::Cw180;
        let mut flips = EditDescriptor::default();
        flips.flip_horizontal = true;
        flips.flip_vertical = true;

        assert_eq!(
            process_image(&src, &rot).data(),
            process_image(&src, &flips).data()
        );
    }

    #[test]
    fn test_before_after_composite_splits_columns() {
        let before = gray(4, 2, 10);
        let after = gray(4, 2, 240);
        let composite = before_after_composite(&before, &after, 0.5);
        assert_eq!(composite.pixel(0, 0)[0], 10);
        assert_eq!(composite.pixel(1, 1)[0], 10);
        assert_eq!(composite.pixel(2, 0)[0], 240);
        assert_eq!(composite.pixel(3, 1)[0], 240);
    }

    #[test]
    fn test_composite_dimension_mismatch_returns_after() {
        let before = gray(4, 2, 10);
        let after = gray(2, 4, 240);
        let composite = before_after_composite(&before, &after, 0.5);
        assert_eq!(composite, after);
    }

    #[test]
    fn test_out_of_range_parameters_clamp_not_error() {
        let src = gray(2, 2, 128);
        let mut edit = EditDescriptor::default();
        edit.exposure = 50.0; // clamps to 2 stops
        let out = process_image(&src, &edit);
        for px in out.data().chunks_exact(4) {
            assert_eq!(px[0], 255);
        }
    }
}
