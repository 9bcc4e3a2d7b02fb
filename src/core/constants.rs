use glam::Vec3;

// Shared scene tuning constants. Everything here is host-testable and used by
// `SceneConfig::default()` and the web frontend.

// Particle cloud
pub const PARTICLE_COUNT: usize = 8000;
pub const CLOUD_SPREAD: f32 = 50.0; // edge of the cube the dormant cloud is scattered in
pub const HELIX_TURNS: f32 = 5.0; // full turns per helix from base to apex
pub const HELIX_APEX_RADIUS: f32 = 0.2; // radius left at the top of each helix
pub const PARTICLE_SIZE: f32 = 0.035;
pub const PARTICLE_OPACITY: f32 = 0.4;

// Tree silhouette
pub const TREE_HEIGHT: f32 = 10.0;
pub const TREE_RADIUS: f32 = 4.0;
pub const CONE_PROXY_SEGMENTS: u32 = 16;

// Formation
pub const FIST_THRESHOLD: f32 = 0.6; // summed wrist-to-fingertip distance (normalized image units)
pub const FORMATION_DURATION_SEC: f32 = 2.2;

// Halo ring
pub const HALO_Y: f32 = -4.0;
pub const HALO_TUBE: f32 = 0.05;
pub const HALO_FADE_DELAY_SEC: f32 = 0.8;
pub const HALO_FADE_DURATION_SEC: f32 = 2.0;
pub const HALO_BASE_OPACITY: f32 = 0.15;
pub const HALO_BREATH_AMPLITUDE: f32 = 0.05;
pub const HALO_BREATH_RATE: f32 = 1.5; // radians per second

// Star
pub const STAR_LIFT: f32 = 0.5; // above the apex
pub const STAR_SCALE_IN_SEC: f32 = 1.2;
pub const STAR_OVERSHOOT: f32 = 2.0;
pub const STAR_SPIN_RAD_PER_SEC: f32 = 0.6;

// Gifts
pub const GIFT_COUNT: usize = 90;
pub const GIFT_MIN_DISTANCE: f32 = 1.0;
pub const GIFT_DISTANCE_SPAN: f32 = 4.5;
pub const GIFT_STACK_FALLOFF: f32 = 5.0; // distance at which stacking height reaches zero
pub const GIFT_STACK_HEIGHT: f32 = 2.5;
pub const GIFT_FLOOR_Y: f32 = -5.0;
pub const GIFT_SIZE_MIN: f32 = 0.25;
pub const GIFT_SIZE_SPAN: f32 = 0.8;
pub const GIFT_RIBBON_MIN: f32 = 0.15;
pub const GIFT_RIBBON_SPAN: f32 = 0.25;
pub const GIFT_TILT: f32 = 0.3; // full range of x/z tilt
pub const GIFT_SCALE_IN_SEC: f32 = 0.8;
pub const GIFT_BASE_DELAY_SEC: f32 = 1.2;
pub const GIFT_STAGGER_SEC: f32 = 0.03;
pub const GIFT_OVERSHOOT: f32 = 1.4;

// Decorations
pub const DECORATION_SCALE_MIN: f32 = 0.4;
pub const DECORATION_SCALE_SPAN: f32 = 0.8;
pub const DECORATION_SCALE_IN_SEC: f32 = 0.7;
pub const DECORATION_OVERSHOOT: f32 = 2.0;
pub const SWAY_AMPLITUDE_MIN: f32 = 0.15;
pub const SWAY_AMPLITUDE_SPAN: f32 = 0.25;
pub const SWAY_PERIOD_MIN_SEC: f32 = 1.2;
pub const SWAY_PERIOD_SPAN_SEC: f32 = 1.0;

// Palette (sRGB hex)
pub const ICE_BLUE: u32 = 0xA5F3FC;
pub const WHITE: u32 = 0xFFFFFF;
pub const BACKGROUND: u32 = 0x050505;
pub const GIFT_COLORS: [u32; 8] = [
    0xCC0000, 0x00AA55, 0x0066CC, 0xDDCC00, 0x9933CC, 0xFF66AA, 0xFFFFFF, 0x333333,
];
pub const RIBBON_COLORS: [u32; 5] = [0xFFD700, 0xFFFFFF, 0xFF0000, 0x00CCFF, 0xCC00AA];
pub const ORNAMENT_COLORS: [u32; 5] = [0xEE0000, 0x0088EE, 0x00AA44, 0xFFCC00, 0xFF44AA];

// Camera
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 4.0, 16.0);
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_MIN_DISTANCE: f32 = 5.0;
pub const CAMERA_MAX_DISTANCE: f32 = 30.0;
pub const CAMERA_AUTO_ROTATE_SPEED: f32 = 0.3; // orbit-control units: 1.0 = one turn per minute
pub const CAMERA_DAMPING: f32 = 0.05; // fraction of pending orbit applied per 60 Hz frame

// Capture + detector
pub const CAPTURE_WIDTH: u32 = 640;
pub const CAPTURE_HEIGHT: u32 = 480;
pub const HAND_LANDMARK_COUNT: usize = 21;

