//! Live parameter modulation for active frames.
//!
//! Every shape gets an exponential-of-sine "breath" per axis, staggered by
//! its index, plus the sustained oscillation of whichever control drives that
//! axis. Later shapes respond more strongly to the breath and slightly less
//! to the controls.

use crate::constants::*;
use crate::controls::{Axis, ControlBank};
use crate::oscillator::{cadence, PhaseState};
use crate::registry::ShapeRegistry;
use crate::shape::{ShapeError, ShapeParams};
use std::f64::consts::PI;

/// Base values, ranges and depth for the modulation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModulationParams {
    pub base: ShapeParams,
    pub m_range: f64,
    pub n_range: f64,
    pub radius_range: f64,
    pub depth: f64,
}

#[inline]
fn breath(phase: f64, offset: f64, cadence: f64, depth: f64) -> f64 {
    ((phase + offset * cadence).sin() * depth).exp()
}

/// Modulated parameters for the shape at `index` of `count`.
///
/// The result does not depend on the shape's previous values; callers repair
/// malformed entries beforehand so a bad shape never poisons the pass.
pub fn modulate(
    index: usize,
    count: usize,
    phases: &PhaseState,
    controls: &ControlBank,
    params: &ModulationParams,
) -> Result<ShapeParams, ShapeError> {
    let frac = if count == 0 {
        0.0
    } else {
        index as f64 / count as f64
    };
    let phase_offset = frac * PI;
    let influence = 0.5 + 0.5 * frac;
    let key_falloff = 1.0 - index as f64 * INDEX_KEY_FALLOFF;

    let axis_value = |axis: Axis, base: f64, range: f64| {
        let e = breath(phases.axis(axis), phase_offset, cadence(axis), params.depth);
        base + (e - 1.0) * range * influence + controls.key_modulation(axis) * key_falloff
    };

    let base = &params.base;
    let radius_base = base.radius * (1.0 + index as f64 * MOD_RADIUS_INDEX_SCALE);
    let radius_breath = breath(phases.radius, phase_offset, CADENCE_RADIUS, params.depth);

    let out = ShapeParams {
        m: axis_value(Axis::M, base.m, params.m_range),
        n1: axis_value(Axis::N1, base.n1, params.n_range),
        n2: axis_value(Axis::N2, base.n2, params.n_range),
        n3: axis_value(Axis::N3, base.n3, params.n_range),
        radius: radius_base + (radius_breath - 1.0) * params.radius_range * influence,
    };
    out.check_finite()?;
    Ok(out.floored())
}

/// Run one modulation pass over the whole registry, O(N).
///
/// A shape whose update fails keeps its current parameters for this frame;
/// the failure is logged and the rest of the pass continues. Returns the
/// number of shapes skipped.
pub fn modulate_all(
    registry: &mut ShapeRegistry,
    phases: &PhaseState,
    controls: &ControlBank,
    params: &ModulationParams,
) -> usize {
    let count = registry.len();
    let mut skipped = 0;
    for (index, shape) in registry.iter_mut().enumerate() {
        let (repaired, fixed) = shape.params().repaired(&params.base);
        if fixed > 0 {
            log::warn!("[modulation] shape {} had {} malformed field(s)", index, fixed);
            shape.set_params(repaired);
        }
        match modulate(index, count, phases, controls, params) {
            Ok(p) => shape.set_params(p),
            Err(e) => {
                log::warn!("[modulation] skipping shape {}: {}", index, e);
                skipped += 1;
            }
        }
    }
    skipped
}
