mod focus;
mod keyboard;
mod wheel;

pub use focus::wire_focus_loss;
pub use keyboard::wire_keyboard;
pub use wheel::wire_wheel_zoom;
