pub mod color;
pub mod config;
pub mod constants;
pub mod controls;
pub mod engine;
pub mod modulation;
pub mod oscillator;
pub mod registry;
pub mod reset;
pub mod shape;
pub mod state;

pub use color::*;
pub use config::*;
pub use controls::*;
pub use engine::*;
pub use modulation::*;
pub use oscillator::*;
pub use registry::*;
pub use reset::*;
pub use shape::*;
pub use state::*;
