use crate::core::tangent_space::TangentOptions;
use crate::error::LoadError;
use crate::io::config::{CameraConfig, Config, LightConfig, ObjectConfig};
use crate::scene::camera::{Camera, CameraMode};
use crate::scene::context::SceneContext;
use crate::scene::light::LightSettings;
use crate::scene::model::Model;
use crate::scene::player::Player;
use crate::scene::scene_object::{SceneObject, Transform};
use crate::scene::texture::TextureFormat;
use log::{debug, info, warn};
use nalgebra::{Point3, Vector3};
use std::collections::HashMap;
use std::sync::Arc;

pub fn build_camera(config: &CameraConfig, aspect_ratio: f32) -> Camera {
    let forward = Vector3::from(config.forward_or_default());
    let up = Vector3::from(config.up_or_default());

    match config.mode {
        CameraMode::TopDown => Camera::new_top_down(
            forward,
            up,
            config.ortho_bounds,
            config.ortho_near,
            config.ortho_far,
        ),
        CameraMode::FirstPerson => Camera::new_first_person(up, config.fov, aspect_ratio),
        CameraMode::ThirdPerson => {
            Camera::new_third_person(forward, up, config.fov, aspect_ratio)
        }
    }
}

/// Light parameters from config; intensity and position are filled in by the
/// player every frame.
pub fn build_light_template(config: &LightConfig) -> LightSettings {
    LightSettings {
        specular_phong: config.specular_phong,
        specular_strength: config.specular_strength,
        ambient_strength: config.ambient_strength,
        ambient_color: Vector3::from(config.ambient_color),
        light_color: Vector3::from(config.light_color),
        position: Point3::origin(),
        ..Default::default()
    }
}

/// Models built during one scene load, keyed by source file and textures.
/// Objects with the same key share one [`Model`].
#[derive(Default)]
pub struct ModelCache {
    models: HashMap<ModelKey, Arc<Model>>,
}

type ModelKey = (String, Option<String>, Option<String>, TextureFormat);

impl ModelCache {
    pub fn get_or_load(
        &mut self,
        config: &ObjectConfig,
        options: &TangentOptions,
    ) -> Result<Arc<Model>, LoadError> {
        let key = (
            config.path.clone(),
            config.texture.clone(),
            config.normal_texture.clone(),
            config.texture_format,
        );
        if let Some(model) = self.models.get(&key) {
            debug!("Reusing model '{}'", config.path);
            return Ok(Arc::clone(model));
        }

        let model = Arc::new(load_model(config, options)?);
        self.models.insert(key, Arc::clone(&model));
        Ok(model)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Loads the model of one object and attaches its textures. A texture that
/// fails to load is skipped with a warning; a model that fails to load is an
/// error.
fn load_model(config: &ObjectConfig, options: &TangentOptions) -> Result<Model, LoadError> {
    let mut model = Model::load(&config.path, options)?;

    if let Some(path) = &config.texture
        && let Err(e) = model.attach_texture(path, config.texture_format)
    {
        warn!("Skipping base texture for '{}': {}", config.path, e);
    }
    if let Some(path) = &config.normal_texture
        && let Err(e) = model.attach_normal_texture(path, config.texture_format)
    {
        warn!("Skipping normal map for '{}': {}", config.path, e);
    }
    Ok(model)
}

pub fn load_object(
    config: &ObjectConfig,
    options: &TangentOptions,
    cache: &mut ModelCache,
) -> Result<SceneObject, LoadError> {
    let transform = Transform {
        position: Vector3::from(config.position),
        rotation: Vector3::from(config.rotation),
        scale: config.scale,
    };
    Ok(SceneObject::new(cache.get_or_load(config, options)?, transform))
}

/// Initial resource loading (heavy I/O). Returns a ready [`SceneContext`].
pub fn init_scene(config: &Config) -> Result<SceneContext, LoadError> {
    let options = TangentOptions {
        orthogonalize: config.mesh.orthogonalize_tangents,
    };
    let mut cache = ModelCache::default();

    let camera = build_camera(&config.camera, config.window.aspect_ratio());
    let player = Player::new(
        load_object(&config.player, &options, &mut cache)?,
        build_light_template(&config.light),
    );
    let enemies = config
        .enemies
        .iter()
        .map(|enemy| load_object(enemy, &options, &mut cache))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        "Scene initialized: player + {} enemies from {} models, {} camera",
        enemies.len(),
        cache.len(),
        config.camera.mode
    );

    Ok(SceneContext::new(player, enemies, camera))
}
