//! Engine configuration table.
//!
//! Two tuning variants exist. Neither is implicit: callers pick one through
//! [`EngineConfig::from_preset`] and may adjust fields afterwards.

use crate::color::Rgb;
use crate::constants::*;
use crate::controls::{Axis, ControlSpec};
use crate::modulation::ModulationParams;
use crate::oscillator::PhaseState;
use crate::shape::ShapeParams;
use fnv::FnvHashSet;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TuningPreset {
    /// Four axis controls, sweep locked to the m phase, fast housekeeping.
    Cinematic,
    /// Cinematic controls plus an arpeggio control with no geometry of its
    /// own; sweep starts at angle 0 and housekeeping runs once a second.
    Arpeggio,
}

impl TuningPreset {
    pub fn name(self) -> &'static str {
        match self {
            TuningPreset::Cinematic => "cinematic",
            TuningPreset::Arpeggio => "arpeggio",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cinematic" => Some(TuningPreset::Cinematic),
            "arpeggio" => Some(TuningPreset::Arpeggio),
            _ => None,
        }
    }
}

/// Where each polyline sweep begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepStart {
    /// Start at the current m phase, so the outline slowly rotates.
    MPhase,
    Zero,
}

/// Initial values of the phase accumulators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseInit {
    Zero,
    Seeded(u64),
}

impl PhaseInit {
    pub fn phases(self) -> PhaseState {
        match self {
            PhaseInit::Zero => PhaseState::default(),
            PhaseInit::Seeded(seed) => PhaseState::seeded(seed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must lie in (0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("zoom range is empty: min {min} > max {max}")]
    ZoomRange { min: f64, max: f64 },
    #[error("key '{0}' is bound to more than one control")]
    DuplicateKey(char),
    #[error("viewport size must be finite, got {width} x {height}")]
    Viewport { width: f64, height: f64 },
    #[error("sweep needs at least one segment")]
    NoSegments,
    #[error("base shape is invalid: {0}")]
    Base(#[from] crate::shape::ShapeError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub preset: TuningPreset,
    pub base: ShapeParams,
    pub m_range: f64,
    pub n_range: f64,
    pub radius_range: f64,
    pub oscillation_depth: f64,
    pub color_richness: f64,
    pub base_color: Rgb,
    pub controls: Vec<ControlSpec>,
    pub transition_rate: f64,
    pub animation_speed: f64,
    pub reset_rate: f64,
    pub reset_epsilon: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_initial: f64,
    pub sweep_start: SweepStart,
    pub sweep_segments: usize,
    pub housekeeping_interval: Duration,
    pub phase_init: PhaseInit,
}

fn axis_controls() -> Vec<ControlSpec> {
    CONTROL_KEYS
        .iter()
        .zip(Axis::ALL)
        .zip(DEFAULT_CONTROL_COLORS)
        .map(|((&key, axis), color)| ControlSpec {
            key,
            axis: Some(axis),
            color: Some(Rgb::from_array(color)),
            mod_range: CONTROL_MOD_RANGE,
        })
        .collect()
}

impl EngineConfig {
    pub fn from_preset(preset: TuningPreset) -> Self {
        let mut controls = axis_controls();
        let (sweep_start, housekeeping_ms) = match preset {
            TuningPreset::Cinematic => (SweepStart::MPhase, HOUSEKEEPING_CINEMATIC_MS),
            TuningPreset::Arpeggio => {
                controls.push(ControlSpec {
                    key: ARPEGGIO_KEY,
                    axis: None,
                    color: None,
                    mod_range: 0.0,
                });
                (SweepStart::Zero, HOUSEKEEPING_ARPEGGIO_MS)
            }
        };
        Self {
            preset,
            base: ShapeParams::BASELINE,
            m_range: M_RANGE,
            n_range: N_RANGE,
            radius_range: RADIUS_RANGE,
            oscillation_depth: OSCILLATION_DEPTH,
            color_richness: COLOR_RICHNESS,
            base_color: Rgb::from_array(BASE_COLOR),
            controls,
            transition_rate: TRANSITION_RATE,
            animation_speed: ANIMATION_SPEED,
            reset_rate: RESET_LERP,
            reset_epsilon: RESET_EPSILON,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_initial: ZOOM_INITIAL,
            sweep_start,
            sweep_segments: SWEEP_SEGMENTS,
            housekeeping_interval: Duration::from_millis(housekeeping_ms),
            phase_init: PhaseInit::Zero,
        }
    }

    pub fn with_phase_init(mut self, phase_init: PhaseInit) -> Self {
        self.phase_init = phase_init;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base.validate()?;
        let positives = [
            ("transition_rate", self.transition_rate),
            ("animation_speed", self.animation_speed),
            ("reset_rate", self.reset_rate),
            ("reset_epsilon", self.reset_epsilon),
            ("zoom_min", self.zoom_min),
        ];
        for (name, value) in positives {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        // smoothing steps past 1 overshoot their target and never settle
        for (name, value) in [
            ("transition_rate", self.transition_rate),
            ("reset_rate", self.reset_rate),
        ] {
            if value > 1.0 {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        if self.zoom_min > self.zoom_max {
            return Err(ConfigError::ZoomRange {
                min: self.zoom_min,
                max: self.zoom_max,
            });
        }
        if self.sweep_segments == 0 {
            return Err(ConfigError::NoSegments);
        }
        let mut seen = FnvHashSet::default();
        for c in &self.controls {
            if !seen.insert(c.key.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateKey(c.key));
            }
        }
        Ok(())
    }

    /// Modulation inputs for the current radius range.
    pub fn modulation(&self, radius_range: f64) -> ModulationParams {
        ModulationParams {
            base: self.base,
            m_range: self.m_range,
            n_range: self.n_range,
            radius_range,
            depth: self.oscillation_depth,
        }
    }
}
