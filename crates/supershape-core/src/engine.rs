use crate::color::{composite, Rgb};
use crate::config::{ConfigError, EngineConfig, SweepStart};
use crate::constants::RADIUS_RANGE_MIN;
use crate::controls::{ControlBank, ControlId};
use crate::modulation::modulate_all;
use crate::oscillator::{PhaseOscillatorBank, PhaseState};
use crate::registry::ShapeRegistry;
use crate::reset::{ResetState, ResetTransitionController};
use crate::shape::{sample_polyline, Shape, ShapeError, ShapeParams};
use crate::state::{FrameOutput, ShapeStroke, ViewTransform};
use glam::DVec2;
use smallvec::SmallVec;
use std::time::Duration;

/// Host input, applied at the start of the next tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Press(ControlId),
    Release(ControlId),
    AddShape,
    /// Additive zoom change; the result is clamped to the configured range.
    Zoom(f64),
    /// Window blur or page hidden: every control is dropped at once.
    FocusLost,
    Resize {
        width: f64,
        height: f64,
    },
}

/// Result of a housekeeping pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HousekeepingReport {
    pub repaired_fields: usize,
    pub release_voices: bool,
}

/// Periodic cleanup folded into the frame loop.
///
/// Accumulates frame time and runs once per `interval`: repairs malformed
/// shape fields and, when nothing is held, asks the audio side to release
/// any voices still sounding.
#[derive(Clone, Debug)]
pub struct Housekeeping {
    interval: Duration,
    accum: Duration,
}

impl Housekeeping {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accum: Duration::ZERO,
        }
    }

    pub fn step(
        &mut self,
        dt: Duration,
        registry: &mut ShapeRegistry,
        controls: &ControlBank,
        defaults: &ShapeParams,
    ) -> Option<HousekeepingReport> {
        self.accum += dt;
        if self.accum < self.interval {
            return None;
        }
        // keep the overshoot so passes stay on the interval grid
        self.accum = match self.interval.as_nanos() {
            0 => Duration::ZERO,
            n => Duration::from_nanos((self.accum.as_nanos() % n) as u64),
        };
        let report = HousekeepingReport {
            repaired_fields: registry.repair(defaults),
            release_voices: controls.active_count() == 0,
        };
        Some(report)
    }
}

/// The shape animation engine: owns every piece of mutable state and turns
/// queued input plus one tick into one [`FrameOutput`].
///
/// Typical usage:
/// - Construct with `Engine::new(config, width, height)`; one shape is added
/// - Forward host input with `push_event`
/// - Call `tick(dt)` once per display refresh and draw the returned strokes
pub struct Engine {
    config: EngineConfig,
    registry: ShapeRegistry,
    controls: ControlBank,
    oscillators: PhaseOscillatorBank,
    reset: ResetTransitionController,
    housekeeping: Housekeeping,
    pending: SmallVec<[InputEvent; 8]>,
    zoom: f64,
    center: DVec2,
    radius_range: f64,
}

impl Engine {
    pub fn new(config: EngineConfig, width: f64, height: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        if !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::Viewport { width, height });
        }
        let controls = ControlBank::new(&config.controls, config.transition_rate);
        let oscillators =
            PhaseOscillatorBank::new(config.phase_init.phases(), config.animation_speed);
        let reset = ResetTransitionController::new(config.reset_rate, config.reset_epsilon);
        let housekeeping = Housekeeping::new(config.housekeeping_interval);
        let zoom = config
            .zoom_initial
            .clamp(config.zoom_min, config.zoom_max);
        let radius_range = config.radius_range;
        let mut engine = Self {
            config,
            registry: ShapeRegistry::new(),
            controls,
            oscillators,
            reset,
            housekeeping,
            pending: SmallVec::new(),
            zoom,
            center: DVec2::new(width / 2.0, height / 2.0),
            radius_range,
        };
        engine.add_shape();
        log::info!(
            "[engine] preset={} controls={} shapes={}",
            engine.config.preset.name(),
            engine.controls.len(),
            engine.registry.len()
        );
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn shapes(&self) -> &[Shape] {
        self.registry.as_slice()
    }

    pub fn controls(&self) -> &ControlBank {
        &self.controls
    }

    pub fn phases(&self) -> &PhaseState {
        self.oscillators.phases()
    }

    pub fn reset_state(&self) -> ResetState {
        self.reset.state()
    }

    pub fn reset_controller(&self) -> &ResetTransitionController {
        &self.reset
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn radius_range(&self) -> f64 {
        self.radius_range
    }

    /// Control bound to `key`, if any.
    pub fn control_for_key(&self, key: char) -> Option<ControlId> {
        self.controls.lookup(key)
    }

    /// Queue an input event; nothing changes until the next `tick`.
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    fn add_shape(&mut self) {
        match self.registry.add(self.center) {
            Ok(index) => {
                let radius = self.registry.as_slice()[index].params().radius;
                self.radius_range =
                    (self.config.radius_range * radius / 100.0).max(RADIUS_RANGE_MIN);
                self.reset.on_shape_added(index, &self.config.base);
                log::info!("[shapes] added shape {} (radius {:.1})", index, radius);
            }
            Err(e) => log::warn!("[shapes] add-shape rejected: {}", e),
        }
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(id) => {
                if self.controls.press(id) {
                    log::debug!("[controls] press {:?}", id);
                }
            }
            InputEvent::Release(id) => {
                if self.controls.release(id) {
                    log::debug!("[controls] release {:?}", id);
                }
            }
            InputEvent::AddShape => self.add_shape(),
            InputEvent::Zoom(delta) => {
                if delta.is_finite() {
                    self.zoom = (self.zoom + delta).clamp(self.config.zoom_min, self.config.zoom_max);
                }
            }
            InputEvent::FocusLost => {
                self.controls.release_all();
                log::debug!("[controls] focus lost; all controls released");
            }
            InputEvent::Resize { width, height } => {
                if width.is_finite() && height.is_finite() {
                    self.center = DVec2::new(width / 2.0, height / 2.0);
                    self.registry.recenter(self.center);
                }
            }
        }
    }

    /// Run one frame.
    pub fn tick(&mut self, dt: Duration) -> FrameOutput {
        let events = std::mem::take(&mut self.pending);
        for ev in events {
            self.apply(ev);
        }

        self.controls.advance();

        let active = self.controls.active_count() > 0;
        if active {
            self.reset.abort();
            self.oscillators.advance();
            self.controls
                .advance_mod_phases(self.oscillators.base_speed());
            let params = self.config.modulation(self.radius_range);
            modulate_all(
                &mut self.registry,
                self.oscillators.phases(),
                &self.controls,
                &params,
            );
        } else {
            self.reset.step(&mut self.registry, &self.config.base);
        }

        let report = self
            .housekeeping
            .step(dt, &mut self.registry, &self.controls, &self.config.base);

        let view = ViewTransform {
            center: self.center,
            zoom: self.zoom,
        };
        let color = self.stroke_color();
        let strokes = self.strokes(color, view.stroke_width());

        FrameOutput {
            strokes,
            weights: self.controls.weights(),
            view,
            active,
            release_voices: report.map(|r| r.release_voices).unwrap_or(false),
        }
    }

    /// Base color blended with every colored control's weight.
    pub fn stroke_color(&self) -> Rgb {
        composite(
            self.config.base_color,
            self.controls.color_layers(),
            self.config.color_richness,
        )
    }

    fn sweep_start(&self) -> f64 {
        match self.config.sweep_start {
            SweepStart::MPhase => self.oscillators.phases().m,
            SweepStart::Zero => 0.0,
        }
    }

    fn strokes(&self, color: Rgb, stroke_width: f64) -> Vec<ShapeStroke> {
        let start = self.sweep_start();
        let segments = self.config.sweep_segments;
        self.registry
            .iter()
            .enumerate()
            .filter_map(|(index, shape)| {
                match stroke_for(index, shape, start, segments) {
                    Ok(points) => Some(ShapeStroke {
                        index,
                        points,
                        color,
                        stroke_width,
                    }),
                    Err(e) => {
                        log::warn!("[render] skipping shape {} this frame: {}", index, e);
                        None
                    }
                }
            })
            .collect()
    }
}

fn stroke_for(
    index: usize,
    shape: &Shape,
    start: f64,
    segments: usize,
) -> Result<Vec<DVec2>, ShapeError> {
    shape.params().check_finite()?;
    let points = sample_polyline(shape, start, segments);
    if points.iter().all(|p| p.is_finite()) {
        Ok(points)
    } else {
        Err(ShapeError::Degenerate { index })
    }
}
