use crate::constants::RESET_RADIUS_INDEX_SCALE;
use crate::registry::ShapeRegistry;
use crate::shape::ShapeParams;

/// Externally visible phase of the reset state machine.
///
/// Capturing is instantaneous: the snapshot is taken and convergence starts
/// within the same frame, so callers only ever observe these two states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetState {
    Idle,
    Converging,
}

/// Baseline a shape at `index` returns to when nothing is held.
pub fn baseline(index: usize, base: &ShapeParams) -> ShapeParams {
    ShapeParams {
        radius: base.radius * (1.0 + index as f64 * RESET_RADIUS_INDEX_SCALE),
        ..*base
    }
}

/// Smoothly returns shapes to their baselines once every control is released.
#[derive(Clone, Debug)]
pub struct ResetTransitionController {
    snapshot: Option<Vec<ShapeParams>>,
    settled: bool,
    rate: f64,
    epsilon: f64,
}

impl ResetTransitionController {
    pub fn new(rate: f64, epsilon: f64) -> Self {
        Self {
            snapshot: None,
            settled: false,
            rate,
            epsilon,
        }
    }

    pub fn state(&self) -> ResetState {
        if self.snapshot.is_some() {
            ResetState::Converging
        } else {
            ResetState::Idle
        }
    }

    /// True once convergence has completed and no control has been held since.
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn snapshot(&self) -> Option<&[ShapeParams]> {
        self.snapshot.as_deref()
    }

    /// A control became active: drop any snapshot without finishing.
    /// Returns true if a convergence was in progress.
    pub fn abort(&mut self) -> bool {
        self.settled = false;
        let was_converging = self.snapshot.take().is_some();
        if was_converging {
            log::debug!("[reset] aborted by control activity");
        }
        was_converging
    }

    /// Keep the snapshot aligned with the registry after an add-shape.
    pub fn on_shape_added(&mut self, index: usize, base: &ShapeParams) {
        self.settled = false;
        if let Some(snap) = &mut self.snapshot {
            if snap.len() == index {
                snap.push(baseline(index, base));
            }
        }
    }

    /// Run one idle frame: capture if needed, then pull every shape toward
    /// its snapshot and finish once all parameters are within epsilon.
    pub fn step(&mut self, registry: &mut ShapeRegistry, base: &ShapeParams) -> ResetState {
        if self.snapshot.is_none() {
            if self.settled {
                return ResetState::Idle;
            }
            let snap: Vec<ShapeParams> = (0..registry.len()).map(|i| baseline(i, base)).collect();
            log::debug!("[reset] captured baseline for {} shape(s)", snap.len());
            self.snapshot = Some(snap);
        }

        let Some(snap) = self.snapshot.as_ref() else {
            return ResetState::Idle;
        };
        let mut done = true;
        for (i, shape) in registry.iter_mut().enumerate() {
            let target = snap.get(i).copied().unwrap_or_else(|| baseline(i, base));
            let (current, _) = shape.params().repaired(base);
            let next = current.lerp(&target, self.rate);
            shape.set_params(next);
            if !shape.params().within(&target, self.epsilon) {
                done = false;
            }
        }

        if done {
            log::debug!("[reset] shapes settled at baseline");
            self.snapshot = None;
            self.settled = true;
            ResetState::Idle
        } else {
            ResetState::Converging
        }
    }
}
