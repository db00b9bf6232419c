use crate::scene::camera::Camera;
use crate::scene::light::LightSettings;
use crate::scene::player::Player;
use crate::scene::scene_object::SceneObject;
use crate::ui::input::Key;
use nalgebra::{Matrix4, Point3};

/// Everything one draw call needs besides the vertex buffer and textures.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameUniforms {
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub camera_position: Point3<f32>,
    pub light: LightSettings,
}

/// Holds all scene state driven by the per-frame update loop.
pub struct SceneContext {
    pub player: Player,
    pub enemies: Vec<SceneObject>,
    pub camera: Camera,
}

impl SceneContext {
    pub fn new(player: Player, enemies: Vec<SceneObject>, mut camera: Camera) -> Self {
        camera.follow(&player);
        Self {
            player,
            enemies,
            camera,
        }
    }

    /// Keyboard dispatch: the player moves first, then the camera reacts to
    /// the same key and re-centers on the player.
    pub fn on_key(&mut self, key: Key, now: f32) {
        self.player.handle_key(key, now);
        self.camera.handle_key(key);
        self.camera.follow(&self.player);
    }

    /// Uniforms for every drawable object in draw order: enemies first, the
    /// player last. All objects are lit by the player's headlight.
    pub fn frame_uniforms(&self) -> Vec<(&SceneObject, FrameUniforms)> {
        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix();
        let camera_position = self.camera.eye();
        let light = self.player.light();

        self.enemies
            .iter()
            .chain(std::iter::once(&self.player.object))
            .map(|object| {
                let uniforms = FrameUniforms {
                    model: object.model_matrix(),
                    view,
                    projection,
                    camera_position,
                    light,
                };
                (object, uniforms)
            })
            .collect()
    }
}
