use crate::constants::*;
use crate::shape::{Shape, ShapeError, ShapeParams};
use glam::DVec2;

/// Starting parameters for the shape added when `count` shapes already exist.
///
/// Deterministic: each new shape is a little more lobed, pinched and larger
/// than the last, capped at 10 (parameters) and 200 (radius).
pub fn initial_params(count: usize) -> ShapeParams {
    let c = count as f64;
    ShapeParams {
        m: (BASE_M + c * ADD_M_STEP).min(PARAM_CEILING),
        n1: (BASE_N1 + c * ADD_N1_STEP).min(PARAM_CEILING),
        n2: (BASE_N2 + c * ADD_N2_STEP).min(PARAM_CEILING),
        n3: (BASE_N3 + c * ADD_N3_STEP).min(PARAM_CEILING),
        radius: (BASE_RADIUS + c * ADD_RADIUS_STEP).min(RADIUS_CEILING),
    }
}

/// Append-only ordered list of shapes. Index order drives phase offsets and
/// modulation strength, so shapes are never reordered or removed.
#[derive(Clone, Debug, Default)]
pub struct ShapeRegistry {
    shapes: Vec<Shape>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new shape centered at `center`; returns its index.
    pub fn add(&mut self, center: DVec2) -> Result<usize, ShapeError> {
        let index = self.shapes.len();
        let shape = Shape::new(initial_params(index), center)?;
        self.shapes.push(shape);
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Shape> {
        self.shapes.iter_mut()
    }

    /// Move every shape onto a new render-space center.
    pub fn recenter(&mut self, center: DVec2) {
        for s in &mut self.shapes {
            s.set_center(center);
        }
    }

    /// Replace non-finite parameters with `defaults`. Returns how many fields
    /// were repaired across all shapes.
    pub fn repair(&mut self, defaults: &ShapeParams) -> usize {
        let mut total = 0;
        for (i, s) in self.shapes.iter_mut().enumerate() {
            let (fixed, n) = s.params().repaired(defaults);
            if n > 0 {
                log::warn!("[shapes] repaired {} malformed field(s) on shape {}", n, i);
                s.set_params(fixed);
                total += n;
            }
        }
        total
    }
}
