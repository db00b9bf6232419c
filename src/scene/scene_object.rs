use crate::core::math::transform::TransformFactory;
use crate::scene::model::Model;
use nalgebra::{Matrix4, Vector3};
use std::sync::Arc;

/// Placement of an object in the world. Rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: 1.0,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Matrix4<f32> {
        TransformFactory::model(&self.position, &self.rotation, self.scale)
    }
}

/// An instance of a model in the scene with its own transformation. Objects
/// loaded from the same file share one [`Model`].
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub model: Arc<Model>,
    pub transform: Transform,
}

impl SceneObject {
    pub fn new(model: impl Into<Arc<Model>>, transform: Transform) -> Self {
        Self {
            model: model.into(),
            transform,
        }
    }

    pub fn model_matrix(&self) -> Matrix4<f32> {
        self.transform.matrix()
    }
}
