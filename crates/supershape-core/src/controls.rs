//! Per-control transition tracking.
//!
//! Each control owns a smoothed activation weight that chases a 0/1 target.
//! Press and release are edge-triggered: a second press while held, or a
//! release while not held, changes nothing.

use crate::color::Rgb;
use fnv::FnvHashMap;
use smallvec::SmallVec;

/// Index of a control in the engine's control table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub usize);

/// Shape parameter a control injects its own oscillation into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    M,
    N1,
    N2,
    N3,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::M, Axis::N1, Axis::N2, Axis::N3];
}

/// Static description of a control, fixed at engine construction.
///
/// - `key`: lowercase key binding used by front ends
/// - `axis`: modulated parameter, or `None` for controls that only count as
///   activity (the arpeggio control)
/// - `color`: contribution to the stroke color, or `None`
/// - `mod_range`: amplitude of the control's own oscillation
#[derive(Clone, Debug, PartialEq)]
pub struct ControlSpec {
    pub key: char,
    pub axis: Option<Axis>,
    pub color: Option<Rgb>,
    pub mod_range: f64,
}

/// Live state of one control.
#[derive(Clone, Debug)]
pub struct Control {
    pub spec: ControlSpec,
    current: f64,
    target: f64,
    held: bool,
    mod_phase: f64,
}

impl Control {
    fn new(spec: ControlSpec) -> Self {
        Self {
            spec,
            current: 0.0,
            target: 0.0,
            held: false,
            mod_phase: 0.0,
        }
    }

    /// Smoothed activation in `[0, 1]`.
    pub fn weight(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn mod_phase(&self) -> f64 {
        self.mod_phase
    }
}

pub type WeightList = SmallVec<[(ControlId, f64); 8]>;

/// All controls plus the key lookup table.
#[derive(Clone, Debug)]
pub struct ControlBank {
    controls: Vec<Control>,
    by_key: FnvHashMap<char, ControlId>,
    rate: f64,
}

impl ControlBank {
    pub fn new(specs: &[ControlSpec], rate: f64) -> Self {
        let controls: Vec<Control> = specs.iter().cloned().map(Control::new).collect();
        let by_key = controls
            .iter()
            .enumerate()
            .map(|(i, c)| (c.spec.key.to_ascii_lowercase(), ControlId(i)))
            .collect();
        Self {
            controls,
            by_key,
            rate,
        }
    }

    /// Control bound to `key`, case-insensitive.
    pub fn lookup(&self, key: char) -> Option<ControlId> {
        self.by_key.get(&key.to_ascii_lowercase()).copied()
    }

    pub fn get(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlId, &Control)> {
        self.controls
            .iter()
            .enumerate()
            .map(|(i, c)| (ControlId(i), c))
    }

    /// Press edge. Returns true if the control was not already held.
    pub fn press(&mut self, id: ControlId) -> bool {
        match self.controls.get_mut(id.0) {
            Some(c) if !c.held => {
                c.held = true;
                c.target = 1.0;
                true
            }
            _ => false,
        }
    }

    /// Release edge. Returns true if the control was held.
    pub fn release(&mut self, id: ControlId) -> bool {
        match self.controls.get_mut(id.0) {
            Some(c) if c.held => {
                c.held = false;
                c.target = 0.0;
                true
            }
            _ => false,
        }
    }

    /// Drop every held control at once (focus or visibility lost).
    pub fn release_all(&mut self) {
        for c in &mut self.controls {
            c.held = false;
            c.target = 0.0;
        }
    }

    /// Number of controls currently held.
    pub fn active_count(&self) -> usize {
        self.controls.iter().filter(|c| c.held).count()
    }

    /// One smoothing step toward each target.
    pub fn advance(&mut self) {
        let rate = self.rate;
        for c in &mut self.controls {
            c.current += (c.target - c.current) * rate;
        }
    }

    /// Advance the private oscillation of every held control.
    pub fn advance_mod_phases(&mut self, speed: f64) {
        for c in self.controls.iter_mut().filter(|c| c.held) {
            c.mod_phase += speed;
        }
    }

    /// Summed key modulation injected into `axis`.
    pub fn key_modulation(&self, axis: Axis) -> f64 {
        self.controls
            .iter()
            .filter(|c| c.spec.axis == Some(axis))
            .map(|c| c.current * c.mod_phase.sin() * c.spec.mod_range)
            .sum()
    }

    pub fn weight(&self, id: ControlId) -> Option<f64> {
        self.get(id).map(Control::weight)
    }

    pub fn weights(&self) -> WeightList {
        self.iter().map(|(id, c)| (id, c.current)).collect()
    }

    /// `(color, weight)` pairs for every control that has a color.
    pub fn color_layers(&self) -> impl Iterator<Item = (Rgb, f64)> + '_ {
        self.controls
            .iter()
            .filter_map(|c| c.spec.color.map(|col| (col, c.current)))
    }
}
