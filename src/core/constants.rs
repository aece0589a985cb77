// Shared timing and tuning constants for the landing and experience scenes.

// Hold interaction
pub const HOLD_CEILING_SEC: f32 = 10.0; // elapsed hold time saturates here
pub const HOLD_PULSE_PHASE_SEC: f32 = 10.0; // sonar pulses repeat while elapsed is below this
pub const SONAR_CYCLE_SEC: f32 = 2.5; // one sonar wave per cycle
pub const HOLD_INTENSITY_RATE: f32 = 5.0; // approach rate of the hold intensity uniform
pub const HOLD_REST_INTENSITY: f32 = 0.0; // forced once the reveal has started

// Reveal sequence
pub const GLOW_RATE_PER_SEC: f32 = 1.5;
pub const SHATTER_RATE_PER_SEC: f32 = 0.5;
pub const SHATTER_COMPLETE_AT: f32 = 1.5; // accumulator value, past the visual maximum of 1.0

// Preloader chrome
pub const ENTER_REVEAL_DELAY_SEC: f64 = 0.5; // proceed control appears after assets hit 100%
pub const PRELOADER_FADE_SEC: f32 = 1.0;
pub const MODE_INITIATION_VOLUME: f64 = 0.5;
pub const SYNTHETIC_MUSIC_VOLUME: f64 = 0.4;

// Scroll-driven camera
pub const SCRUB_SEC: f32 = 1.5; // camera lag behind the scroll position
pub const NAVIGATE_THRESHOLD: f32 = 0.95;
pub const NAVIGATE_DELAY_SEC: f64 = 0.5;
pub const OVERLAY_FADE_SEC: f64 = 0.5;
pub const SCROLL_INDICATOR_FADE_PX: f64 = 100.0;
pub const SCROLL_INDICATOR_DROP_PX: f64 = 20.0;
pub const EXPERIENCE_PATH: &str = "/experience";
pub const LANDING_PATH: &str = "/";

// Penthouse placement inside the landing scene
pub const PENTHOUSE_OFFSET: [f32; 3] = [0.0, 5.0, 0.0];
pub const PENTHOUSE_SCALE: f32 = 0.3;
pub const DOOR_LEFT_NAME: &str = "penthouse_door_left";
pub const DOOR_RIGHT_NAME: &str = "penthouse_door_right";
pub const DROP_PART_NAME: &str = "building_bottom";

// Water
pub const WATER_TIME_SCALE: f32 = 0.05; // slow, heavy swell; one real second is a small wave step
pub const GRAVITY: f32 = 9.8;

// Camera
pub const LANDING_FOV_DEG: f32 = 50.0;
pub const PRELOADER_FOV_DEG: f32 = 100.0;
pub const PRELOADER_CAMERA_POS: [f32; 3] = [0.0, 10.0, 15.0];
pub const PRELOADER_MODEL_POS: [f32; 3] = [0.0, 0.0, 4.0];
pub const EXPERIENCE_FOV_DEG: f32 = 70.0;
pub const ZNEAR: f32 = 0.1;
pub const ZFAR: f32 = 1000.0;

// First-person controls
pub const WALK_SPEED: f32 = 4.0;
pub const SPRINT_MULTIPLIER: f32 = 2.0;
pub const JUMP_SPEED: f32 = 5.0;
pub const EYE_HEIGHT: f32 = 1.7;
pub const LOOK_SENSITIVITY: f32 = 0.002; // radians per pixel of pointer movement
pub const PITCH_LIMIT_RAD: f32 = 1.483_53; // 85 degrees
pub const LOCK_COOLDOWN_SEC: f64 = 1.0;

// City
pub const CITY_GRID: i32 = 9; // buildings per side
pub const CITY_SPACING: f32 = 24.0;
pub const CITY_CLEAR_RADIUS: f32 = 30.0; // keep the pool plaza free of buildings

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.7;
pub const BLOOM_THRESHOLD: f32 = 0.8;
