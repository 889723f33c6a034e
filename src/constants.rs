/// Web front-end tuning constants.
///
/// Engine tuning lives in `supershape_core::constants`; these only shape how
/// the browser feeds input in and turns weights into sound.
// Zoom change per wheel notch (sign follows the wheel direction)
pub const ZOOM_STEP: f64 = 0.05;

// Canvas
pub const CANVAS_ID: &str = "app-canvas";
pub const BACKGROUND_STYLE: &str = "black";

// Frame time clamp so a backgrounded tab does not produce one huge step
pub const MAX_FRAME_DT_SEC: f64 = 0.25;

// Drone voice per control, one sustained tone each (Cm7 plus the octave for the arpeggio key)
pub const CONTROL_TONES_HZ: [f32; 5] = [
    130.81, // C3
    155.56, // Eb3
    196.00, // G3
    233.08, // Bb3
    523.25, // C5
];

// Output levels
pub const MASTER_GAIN: f32 = 0.25;
pub const VOICE_LEVEL: f32 = 0.18; // per-voice gain at full transition weight

// Below this weight a voice is silenced outright when housekeeping asks for it
pub const VOICE_RELEASE_FLOOR: f64 = 0.02;
