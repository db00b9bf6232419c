use crate::core::geometry::RawMesh;
use crate::core::tangent_space::TangentOptions;
use crate::error::LoadError;
use crate::io::obj_loader::load_obj;
use crate::scene::mesh::Mesh;
use crate::scene::texture::{Texture, TextureFormat};
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A loaded 3D object: its meshes plus a base color texture and an optional
/// normal map.
#[derive(Debug, Clone)]
pub struct Model {
    pub path: PathBuf,
    pub meshes: Vec<Mesh>,
    pub base_texture: Option<Arc<Texture>>,
    pub normal_texture: Option<Arc<Texture>>,
}

impl Model {
    /// Loads an OBJ file and builds every shape in it.
    pub fn load<P: AsRef<Path>>(path: P, options: &TangentOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw_meshes = load_obj(path)?;
        let model = Self::from_raw(path, &raw_meshes, options)?;

        info!(
            "Model '{}' ready: {} meshes, {} vertices",
            path.display(),
            model.meshes.len(),
            model.vertex_count()
        );
        Ok(model)
    }

    pub fn from_raw<P: AsRef<Path>>(
        path: P,
        raw_meshes: &[RawMesh],
        options: &TangentOptions,
    ) -> Result<Self, LoadError> {
        let meshes = raw_meshes
            .iter()
            .map(|raw| {
                Mesh::build(raw, options).map_err(|source| LoadError::Mesh {
                    name: raw.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.as_ref().to_path_buf(),
            meshes,
            base_texture: None,
            normal_texture: None,
        })
    }

    pub fn attach_texture<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: TextureFormat,
    ) -> Result<(), LoadError> {
        self.base_texture = Some(Arc::new(Texture::load(path, format)?));
        Ok(())
    }

    pub fn attach_normal_texture<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: TextureFormat,
    ) -> Result<(), LoadError> {
        self.normal_texture = Some(Arc::new(Texture::load(path, format)?));
        Ok(())
    }

    pub fn has_normal_map(&self) -> bool {
        self.normal_texture.is_some()
    }

    /// Total number of vertices to draw across all meshes.
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    /// File stem of the source path, used to name exported buffers.
    pub fn name(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string())
    }
}
