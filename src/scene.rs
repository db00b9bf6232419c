pub mod camera;
pub mod context;
pub mod light;
pub mod loader;
pub mod mesh;
pub mod model;
pub mod player;
pub mod scene_object;
pub mod texture;
