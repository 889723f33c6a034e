//! Superformula shapes and the curve evaluator.
//!
//! A shape is a fixed-field record validated at construction. Writes through
//! [`Shape::set_params`] re-apply the parameter floors so the curve formula
//! never turns singular.

use crate::constants::*;
use glam::DVec2;
use std::f64::consts::TAU;
use thiserror::Error;

/// Errors raised while building, animating or sampling a single shape.
///
/// None of these are fatal to the frame loop; the engine logs them and skips
/// the affected shape for the current frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("{field} = {value} is below its floor {floor}")]
    BelowFloor {
        field: &'static str,
        value: f64,
        floor: f64,
    },
    #[error("{field} is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("shape {index} produced a non-finite polyline point")]
    Degenerate { index: usize },
}

/// The five animated superformula parameters (`a = b = 1` are implicit).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParams {
    pub m: f64,
    pub n1: f64,
    pub n2: f64,
    pub n3: f64,
    pub radius: f64,
}

impl ShapeParams {
    /// Global base parameters that idle shapes converge back to.
    pub const BASELINE: ShapeParams = ShapeParams {
        m: BASE_M,
        n1: BASE_N1,
        n2: BASE_N2,
        n3: BASE_N3,
        radius: BASE_RADIUS,
    };

    fn fields(&self) -> [(&'static str, f64, f64); 5] {
        [
            ("m", self.m, M_FLOOR),
            ("n1", self.n1, N_FLOOR),
            ("n2", self.n2, N_FLOOR),
            ("n3", self.n3, N_FLOOR),
            ("radius", self.radius, RADIUS_FLOOR),
        ]
    }

    /// Check finiteness and floors.
    pub fn validate(&self) -> Result<(), ShapeError> {
        for (field, value, floor) in self.fields() {
            if !value.is_finite() {
                return Err(ShapeError::NonFinite { field, value });
            }
            if value < floor {
                return Err(ShapeError::BelowFloor {
                    field,
                    value,
                    floor,
                });
            }
        }
        Ok(())
    }

    /// First non-finite field, if any.
    pub fn check_finite(&self) -> Result<(), ShapeError> {
        match self.fields().into_iter().find(|(_, v, _)| !v.is_finite()) {
            Some((field, value, _)) => Err(ShapeError::NonFinite { field, value }),
            None => Ok(()),
        }
    }

    /// Raise any field below its floor up to the floor. Non-finite values pass
    /// through untouched so [`ShapeParams::repaired`] can still see them.
    pub fn floored(self) -> Self {
        #[inline]
        fn floor_of(v: f64, floor: f64) -> f64 {
            if v < floor {
                floor
            } else {
                v
            }
        }
        Self {
            m: floor_of(self.m, M_FLOOR),
            n1: floor_of(self.n1, N_FLOOR),
            n2: floor_of(self.n2, N_FLOOR),
            n3: floor_of(self.n3, N_FLOOR),
            radius: floor_of(self.radius, RADIUS_FLOOR),
        }
    }

    /// Replace every non-finite field with the matching default.
    /// Returns the repaired params and how many fields were replaced.
    pub fn repaired(self, defaults: &ShapeParams) -> (Self, usize) {
        let mut fixed = 0;
        let mut pick = |v: f64, d: f64| {
            if v.is_finite() {
                v
            } else {
                fixed += 1;
                d
            }
        };
        let out = Self {
            m: pick(self.m, defaults.m),
            n1: pick(self.n1, defaults.n1),
            n2: pick(self.n2, defaults.n2),
            n3: pick(self.n3, defaults.n3),
            radius: pick(self.radius, defaults.radius),
        };
        (out, fixed)
    }

    /// Per-field linear interpolation toward `target`.
    pub fn lerp(self, target: &ShapeParams, t: f64) -> Self {
        #[inline]
        fn mix(a: f64, b: f64, t: f64) -> f64 {
            a + (b - a) * t
        }
        Self {
            m: mix(self.m, target.m, t),
            n1: mix(self.n1, target.n1, t),
            n2: mix(self.n2, target.n2, t),
            n3: mix(self.n3, target.n3, t),
            radius: mix(self.radius, target.radius, t),
        }
    }

    /// True when all five fields are strictly closer than `eps` to `target`.
    pub fn within(&self, target: &ShapeParams, eps: f64) -> bool {
        (self.m - target.m).abs() < eps
            && (self.n1 - target.n1).abs() < eps
            && (self.n2 - target.n2).abs() < eps
            && (self.n3 - target.n3).abs() < eps
            && (self.radius - target.radius).abs() < eps
    }
}

/// One superformula curve placed at a render-space center.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    params: ShapeParams,
    center: DVec2,
}

impl Shape {
    pub fn new(params: ShapeParams, center: DVec2) -> Result<Self, ShapeError> {
        params.validate()?;
        Ok(Self { params, center })
    }

    pub fn params(&self) -> &ShapeParams {
        &self.params
    }

    pub fn center(&self) -> DVec2 {
        self.center
    }

    /// Overwrite the animated parameters, enforcing the floors.
    pub fn set_params(&mut self, params: ShapeParams) {
        self.params = params.floored();
    }

    pub fn set_center(&mut self, center: DVec2) {
        self.center = center;
    }

    /// Radius multiplier at `theta` for this shape.
    #[inline]
    pub fn radius_multiplier(&self, theta: f64) -> f64 {
        evaluate(theta, &self.params)
    }
}

/// Superformula radius multiplier at angle `theta`.
///
/// `r(θ) = (|cos(mθ/4)|^n2 + |sin(mθ/4)|^n3)^(-1/n1)`, with `a = b = 1`.
/// A zero denominator yields 0 so the point collapses onto the center. The
/// result is never negative.
pub fn evaluate(theta: f64, params: &ShapeParams) -> f64 {
    let angle = params.m * theta / 4.0;
    let part1 = angle.cos().abs().powf(params.n2);
    let part2 = angle.sin().abs().powf(params.n3);
    let denom = (part1 + part2).powf(1.0 / params.n1);
    if denom == 0.0 {
        0.0
    } else {
        1.0 / denom
    }
}

/// Sample a closed polyline of `segments + 1` points starting at `start_angle`.
///
/// The last point sits one full turn after the first. It only lands back on
/// the first point when `m` is an even integer; renderers close the path.
pub fn sample_polyline(shape: &Shape, start_angle: f64, segments: usize) -> Vec<DVec2> {
    let segments = segments.max(1);
    let radius = shape.params.radius;
    (0..=segments)
        .map(|i| {
            let theta = start_angle + (i as f64 / segments as f64) * TAU;
            let r = shape.radius_multiplier(theta);
            shape.center + DVec2::new(theta.cos(), theta.sin()) * (radius * r)
        })
        .collect()
}
