//! Document-wide image adjustments.
//!
//! Filter values live on the document and apply to every image shape. They
//! are applied to decoded pixels by the host before textures are uploaded.

use image::{DynamicImage, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const BRIGHTNESS_RANGE: RangeInclusive<f32> = -1.0..=1.0;
pub const BLUR_RANGE: RangeInclusive<f32> = 0.0..=40.0;
pub const SATURATION_RANGE: RangeInclusive<f32> = -2.0..=10.0;
pub const HUE_RANGE: RangeInclusive<f32> = 0.0..=259.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageFilters {
    /// Additive brightness, -1 (black) to 1 (white).
    pub brightness: f32,
    /// Gaussian blur radius in pixels.
    pub blur: f32,
    /// Saturation boost; 0 leaves colors untouched, -1 is grayscale.
    pub saturation: f32,
    /// Hue rotation in degrees.
    pub hue: f32,
}

impl ImageFilters {
    /// Copy with every parameter clamped to its slider range.
    pub fn clamped(self) -> Self {
        fn clamp(value: f32, range: &RangeInclusive<f32>) -> f32 {
            value.clamp(*range.start(), *range.end())
        }

        Self {
            brightness: clamp(self.brightness, &BRIGHTNESS_RANGE),
            blur: clamp(self.blur, &BLUR_RANGE),
            saturation: clamp(self.saturation, &SATURATION_RANGE),
            hue: clamp(self.hue, &HUE_RANGE),
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, source: &DynamicImage) -> RgbaImage {
        let mut pixels = source.to_rgba8();
        if self.is_identity() {
            return pixels;
        }

        if self.brightness != 0.0 {
            let shift = (self.brightness * 255.0).round() as i32;
            pixels = image::imageops::brighten(&pixels, shift);
        }
        if self.hue != 0.0 {
            pixels = image::imageops::huerotate(&pixels, self.hue.round() as i32);
        }
        if self.saturation != 0.0 {
            saturate(&mut pixels, 1.0 + self.saturation);
        }
        if self.blur > 0.0 {
            pixels = image::imageops::blur(&pixels, self.blur);
        }
        pixels
    }
}

/// Scales each pixel's distance from its luma by `factor`.
fn saturate(pixels: &mut RgbaImage, factor: f32) {
    for Rgba([r, g, b, _]) in pixels.pixels_mut() {
        let luma = 0.299 * *r as f32 + 0.587 * *g as f32 + 0.114 * *b as f32;
        for channel in [r, g, b] {
            let value = luma + (*channel as f32 - luma) * factor;
            *channel = value.clamp(0.0, 255.0).round() as u8;
        }
    }
}
