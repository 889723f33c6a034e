use supershape_core::{ControlId, InputEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEdge {
    Down,
    Up,
}

/// Map a DOM `KeyboardEvent.key` to an engine event.
///
/// `ArrowUp` adds a shape on key-down. Single-character keys go through
/// `lookup` (the engine's key table) and become press/release edges. Key
/// auto-repeat needs no filtering since presses are edge-triggered.
pub fn key_event(
    key: &str,
    edge: KeyEdge,
    lookup: impl Fn(char) -> Option<ControlId>,
) -> Option<InputEvent> {
    if key == "ArrowUp" {
        return (edge == KeyEdge::Down).then_some(InputEvent::AddShape);
    }
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let id = lookup(c.to_ascii_lowercase())?;
    Some(match edge {
        KeyEdge::Down => InputEvent::Press(id),
        KeyEdge::Up => InputEvent::Release(id),
    })
}

/// Wheel down zooms out, wheel up zooms in, horizontal-only scroll does nothing.
#[inline]
pub fn wheel_zoom_delta(delta_y: f64, step: f64) -> f64 {
    if delta_y > 0.0 {
        -step
    } else if delta_y < 0.0 {
        step
    } else {
        0.0
    }
}
