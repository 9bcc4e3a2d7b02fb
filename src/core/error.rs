use thiserror::Error;

/// Failures that stop the scene from mounting.
///
/// Runtime conditions (no hand in frame, a click that misses the tree, an
/// unknown decoration id) are not errors and never reach this type.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("no browser window")]
    NoWindow,
    #[error("missing #{0} element")]
    MissingElement(String),
    #[error("element #{0} has the wrong type")]
    WrongElementType(String),
    #[error("no WebGPU adapter")]
    NoAdapter,
    #[error("hand tracking library not loaded: {0}")]
    DetectorUnavailable(String),
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
}
