// Shared tuning constants for the shape engine, used by both web and native frontends.

// Global base shape parameters (superformula a = b = 1 implicitly)
pub const BASE_M: f64 = 2.0;
pub const BASE_N1: f64 = 1.0;
pub const BASE_N2: f64 = 1.0;
pub const BASE_N3: f64 = 1.0;
pub const BASE_RADIUS: f64 = 100.0;

// Modulation ranges around the base parameters
pub const M_RANGE: f64 = 2.0;
pub const N_RANGE: f64 = 2.0;
pub const RADIUS_RANGE: f64 = 20.0;
pub const RADIUS_RANGE_MIN: f64 = 5.0; // floor when radius range follows the newest shape

// Parameter floors; below these the curve formula turns singular
pub const M_FLOOR: f64 = 0.5;
pub const N_FLOOR: f64 = 0.1;
pub const RADIUS_FLOOR: f64 = 10.0;

// Ceilings applied when a shape is first added
pub const PARAM_CEILING: f64 = 10.0;
pub const RADIUS_CEILING: f64 = 200.0;

// Per-index increments for add-shape
pub const ADD_M_STEP: f64 = 0.5;
pub const ADD_N1_STEP: f64 = 0.3;
pub const ADD_N2_STEP: f64 = 0.24; // 0.3 * 0.8
pub const ADD_N3_STEP: f64 = 0.18; // 0.3 * 0.6
pub const ADD_RADIUS_STEP: f64 = 20.0;

// Phase oscillator cadences (golden-ratio detuning)
pub const CADENCE_M: f64 = 1.0;
pub const CADENCE_N1: f64 = 0.618;
pub const CADENCE_N2: f64 = 0.382;
pub const CADENCE_N3: f64 = 0.236;
pub const CADENCE_RADIUS: f64 = 0.146;

// Base phase advance per active tick
pub const ANIMATION_SPEED: f64 = 0.01;

// Modulation shaping
pub const INDEX_KEY_FALLOFF: f64 = 0.02; // key modulation loses 2% per shape index
pub const MOD_RADIUS_INDEX_SCALE: f64 = 0.1; // live base radius grows 10% per index
pub const RESET_RADIUS_INDEX_SCALE: f64 = 0.2; // baseline radius grows 20% per index

// Control smoothing
pub const TRANSITION_RATE: f64 = 0.05;
pub const CONTROL_MOD_RANGE: f64 = 3.0;

// Reset convergence
pub const RESET_LERP: f64 = 0.02;
pub const RESET_EPSILON: f64 = 1e-3;

// Zoom
pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 5.0;
pub const ZOOM_INITIAL: f64 = 1.0;
pub const BASE_STROKE_WIDTH: f64 = 2.0; // divided by zoom

// Polyline sweep
pub const SWEEP_SEGMENTS: usize = 500;

// Oscillation amplitude inside exp(sin(..) * depth)
pub const OSCILLATION_DEPTH: f64 = 0.3;

// Housekeeping cadence per preset (milliseconds)
pub const HOUSEKEEPING_CINEMATIC_MS: u64 = 100;
pub const HOUSEKEEPING_ARPEGGIO_MS: u64 = 1000;

// Default palette
pub const BASE_COLOR: [u8; 3] = [0x2C, 0x2C, 0x54]; // cosmos blue
pub const DEFAULT_CONTROL_COLORS: [[u8; 3]; 4] = [
    [0xFF, 0x6B, 0x6B], // red
    [0x4E, 0xCD, 0xC4], // turquoise
    [0xFF, 0xE6, 0x6D], // yellow
    [0x95, 0xE1, 0xD3], // mint
];
pub const COLOR_RICHNESS: f64 = 0.5; // share of a fully-held control's color added to the base

// Default control keys, one per modulated axis
pub const CONTROL_KEYS: [char; 4] = ['q', 'w', 'e', 'r'];
pub const ARPEGGIO_KEY: char = 'p';
