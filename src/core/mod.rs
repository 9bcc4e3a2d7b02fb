pub mod assembly;
pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod mesh;
pub mod particles;
pub mod placement;
pub mod scene;
pub mod state;
pub mod tween;

pub use assembly::{Assembly, DecorationKind, Part, Primitive};
pub use camera::OrbitCamera;
pub use config::{CaptureConfig, DetectorConfig, SceneConfig};
pub use error::SceneError;
pub use gesture::{GestureAdapter, Landmark, Subscription};
pub use placement::Ray;
pub use scene::{FormationState, MeshInstance, SceneController, SceneEvent};
pub use state::AppState;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
