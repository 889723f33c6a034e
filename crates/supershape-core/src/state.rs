//! Visual-side frame state shared with the web and native frontends.
//!
//! These types avoid platform-specific APIs. A frontend draws each
//! [`ShapeStroke`] through the frame's [`ViewTransform`] and forwards the
//! control weights to whatever produces sound.

use crate::color::Rgb;
use crate::constants::BASE_STROKE_WIDTH;
use crate::controls::WeightList;
use glam::{DAffine2, DVec2};

/// Zoom about the viewport center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    pub center: DVec2,
    pub zoom: f64,
}

impl ViewTransform {
    /// Render-space → screen-space transform: scale by `zoom` around `center`.
    pub fn affine(&self) -> DAffine2 {
        DAffine2::from_translation(self.center)
            * DAffine2::from_scale(DVec2::splat(self.zoom))
            * DAffine2::from_translation(-self.center)
    }

    /// Stroke width in render space that appears constant on screen.
    pub fn stroke_width(&self) -> f64 {
        BASE_STROKE_WIDTH / self.zoom
    }
}

/// One closed outline ready to stroke.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeStroke {
    pub index: usize,
    pub points: Vec<DVec2>,
    pub color: Rgb,
    pub stroke_width: f64,
}

/// Everything a frontend needs from one engine tick.
///
/// - `strokes`: outlines in registry order; a shape that failed this frame
///   is missing from the list
/// - `weights`: smoothed control weights for the audio side
/// - `release_voices`: set by housekeeping when nothing is held and lingering
///   voices should be silenced
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub strokes: Vec<ShapeStroke>,
    pub weights: WeightList,
    pub view: ViewTransform,
    pub active: bool,
    pub release_voices: bool,
}
