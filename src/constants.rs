// Web frontend constants: DOM contract and post-processing.

// DOM ids and attributes the page must provide
pub const CANVAS_ID: &str = "app-canvas";
pub const VIDEO_ID: &str = "input-video";
pub const INSTRUCTION_ID: &str = "instruction";
pub const DECO_BAR_ID: &str = "deco-bar";
pub const DECO_ATTR: &str = "data-deco";
pub const SELECTED_CLASS: &str = "selected";
pub const HIDDEN_CLASS: &str = "hidden";

// Backing store resolution is capped at this many device pixels per CSS pixel.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Hand tracking model files
pub const HANDS_ASSET_BASE: &str = "https://cdn.jsdelivr.net/npm/@mediapipe/hands/";

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.8;
pub const BLOOM_THRESHOLD: f32 = 0.7;
pub const BLOOM_SMOOTH_WIDTH: f32 = 0.01;
