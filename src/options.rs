// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use image::imageops::FilterType;

use crate::{tiny_skia, Error};

/// Default output width in pixels.
pub const TARGET_WIDTH: u32 = 7680;

/// Default output height in pixels.
pub const TARGET_HEIGHT: u32 = 4320;

/// Default ratio between the first-stage render and the final size.
///
/// `1.0` renders the vector directly at the target size.
/// Lower values trade fidelity for speed.
pub const SCALE_FACTOR: f32 = 1.0;

/// How the SVG's own size is placed onto the rendered canvas.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Fit {
    /// Scale uniformly to cover the whole canvas, cropping centered.
    #[default]
    Cover,
    /// Scale uniformly to fit inside the canvas, centered.
    Contain,
    /// Stretch to the canvas, ignoring the aspect ratio.
    Fill,
}

impl Fit {
    /// Returns a transform that maps a `src` sized image onto a `dst` sized canvas.
    pub fn transform(&self, src: tiny_skia::Size, dst: tiny_skia::IntSize) -> tiny_skia::Transform {
        let sx = dst.width() as f32 / src.width();
        let sy = dst.height() as f32 / src.height();

        let s = match *self {
            Fit::Fill => return tiny_skia::Transform::from_scale(sx, sy),
            Fit::Cover => sx.max(sy),
            Fit::Contain => sx.min(sy),
        };

        let tx = (dst.width() as f32 - src.width() * s) / 2.0;
        let ty = (dst.height() as f32 - src.height() * s) / 2.0;
        tiny_skia::Transform::from_row(s, 0.0, 0.0, s, tx, ty)
    }
}

/// Conversion options.
///
/// Built once per run and shared by every conversion.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Config {
    /// Output width in pixels.
    pub target_width: u32,

    /// Output height in pixels.
    pub target_height: u32,

    /// First-stage render size relative to the target size.
    pub scale_factor: f32,

    /// Resampling kernel used to reach the target size.
    pub filter: FilterType,

    /// Placement of the SVG onto the first-stage canvas.
    pub fit: Fit,

    /// Maximum number of conversions in flight.
    ///
    /// Files are converted one at a time unless this is raised.
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            target_width: TARGET_WIDTH,
            target_height: TARGET_HEIGHT,
            scale_factor: SCALE_FACTOR,
            filter: FilterType::Lanczos3,
            fit: Fit::default(),
            jobs: 1,
        }
    }
}

impl Config {
    /// Returns the final output size.
    pub fn target_size(&self) -> Option<tiny_skia::IntSize> {
        tiny_skia::IntSize::from_wh(self.target_width, self.target_height)
    }

    /// Returns the first-stage render size.
    ///
    /// Each side is `floor(target * scale_factor)`.
    /// Returns `None` when either side rounds down to zero.
    pub fn stage_size(&self) -> Option<tiny_skia::IntSize> {
        let w = (self.target_width as f64 * self.scale_factor as f64).floor();
        let h = (self.target_height as f64 * self.scale_factor as f64).floor();
        if !(w >= 1.0 && h >= 1.0 && w <= u32::MAX as f64 && h <= u32::MAX as f64) {
            return None;
        }

        tiny_skia::IntSize::from_wh(w as u32, h as u32)
    }

    /// Checks that the options can produce an image.
    pub fn validate(&self) -> Result<(), Error> {
        if self.target_size().is_none() {
            return Err(Error::InvalidConfig("target size cannot be zero"));
        }

        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(Error::InvalidConfig("scale factor should be positive"));
        }

        if self.stage_size().is_none() {
            return Err(Error::InvalidConfig("scale factor is too small"));
        }

        if self.jobs == 0 {
            return Err(Error::InvalidConfig("jobs cannot be zero"));
        }

        Ok(())
    }
}
