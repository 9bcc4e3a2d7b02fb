//! Runtime knobs for the scene and the hand detector.
//!
//! Every field defaults to the matching value in [`crate::core::constants`];
//! callers override only what they need, e.g.
//! `SceneConfig { fist_threshold: 0.5, ..Default::default() }`.

use crate::core::constants::*;

/// Parameters for the scene controller and the particle cloud it owns.
///
/// - `particle_count`: number of points in the cloud (split evenly across two helices)
/// - `tree_height`, `tree_radius`: silhouette of the formed tree and of the placement cone
/// - `fist_threshold`: summed wrist-to-fingertip distance below which a hand counts as a fist
/// - `formation_duration_sec`: length of the cloud-to-tree interpolation
/// - `gift_count`: gifts materialized under the tree once it is formed
/// - `seed`: base seed for every random choice the scene makes
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub tree_height: f32,
    pub tree_radius: f32,
    pub fist_threshold: f32,
    pub formation_duration_sec: f32,
    pub gift_count: usize,
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            tree_height: TREE_HEIGHT,
            tree_radius: TREE_RADIUS,
            fist_threshold: FIST_THRESHOLD,
            formation_duration_sec: FORMATION_DURATION_SEC,
            gift_count: GIFT_COUNT,
            seed: 0x5EED_7EE5,
        }
    }
}

/// Options handed to the hand-landmark detector.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorConfig {
    pub max_num_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_num_hands: 1,
            model_complexity: 1,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

/// Resolution requested from the camera capture loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: CAPTURE_WIDTH,
            height: CAPTURE_HEIGHT,
        }
    }
}
