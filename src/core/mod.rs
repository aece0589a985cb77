pub mod camera;
pub mod config;
pub mod constants;
pub mod cue;
pub mod easing;
pub mod error;
pub mod first_person;
pub mod geometry;
pub mod hold;
pub mod materials;
pub mod navigation;
pub mod phase;
pub mod preloader;
pub mod reveal;
pub mod scene;
pub mod scroll_scene;
pub mod shading;
pub mod timeline;

pub use camera::Camera;
pub use config::TimelineConfig;
pub use cue::{AudioCommand, Cue};
pub use preloader::Preloader;
pub use scene::{DoorHandles, SceneGraph};
pub use scroll_scene::ScrollScene;

// Shaders bundled as string constants
pub static LIT_WGSL: &str = include_str!("../../shaders/lit.wgsl");
pub static CITY_WGSL: &str = include_str!("../../shaders/city.wgsl");
pub static WATER_WGSL: &str = include_str!("../../shaders/water.wgsl");
pub static CLOUDS_WGSL: &str = include_str!("../../shaders/clouds.wgsl");
pub static LOADER_WGSL: &str = include_str!("../../shaders/loader.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
