use crate::constants::*;
use crate::controls::Axis;
use rand::prelude::*;
use std::f64::consts::TAU;

/// The five phase accumulators driving the breathing motion.
///
/// Phases only ever grow; they are never wrapped or reset.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PhaseState {
    pub m: f64,
    pub n1: f64,
    pub n2: f64,
    pub n3: f64,
    pub radius: f64,
}

impl PhaseState {
    /// Random starting angles in `[0, 2π)`, reproducible from `seed`.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self {
            m: rng.gen_range(0.0..TAU),
            n1: rng.gen_range(0.0..TAU),
            n2: rng.gen_range(0.0..TAU),
            n3: rng.gen_range(0.0..TAU),
            radius: rng.gen_range(0.0..TAU),
        }
    }

    #[inline]
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::M => self.m,
            Axis::N1 => self.n1,
            Axis::N2 => self.n2,
            Axis::N3 => self.n3,
        }
    }
}

/// Cadence multiplier of an axis relative to the base animation speed.
#[inline]
pub fn cadence(axis: Axis) -> f64 {
    match axis {
        Axis::M => CADENCE_M,
        Axis::N1 => CADENCE_N1,
        Axis::N2 => CADENCE_N2,
        Axis::N3 => CADENCE_N3,
    }
}

/// Bank of five detuned phase oscillators.
///
/// Call [`PhaseOscillatorBank::advance`] once per frame while at least one
/// control is held. Idle frames simply skip the call, which leaves the
/// phases bit-for-bit unchanged.
#[derive(Clone, Debug)]
pub struct PhaseOscillatorBank {
    phases: PhaseState,
    base_speed: f64,
}

impl PhaseOscillatorBank {
    pub fn new(initial: PhaseState, base_speed: f64) -> Self {
        Self {
            phases: initial,
            base_speed,
        }
    }

    pub fn advance(&mut self) {
        let s = self.base_speed;
        self.phases.m += s * CADENCE_M;
        self.phases.n1 += s * CADENCE_N1;
        self.phases.n2 += s * CADENCE_N2;
        self.phases.n3 += s * CADENCE_N3;
        self.phases.radius += s * CADENCE_RADIUS;
    }

    pub fn phases(&self) -> &PhaseState {
        &self.phases
    }

    pub fn base_speed(&self) -> f64 {
        self.base_speed
    }
}
