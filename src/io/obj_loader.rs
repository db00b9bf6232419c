use crate::core::geometry::{CornerIndex, RawMesh};
use crate::error::{AttributeKind, LoadError, MeshError};
use log::{info, warn};
use nalgebra::{Point3, Vector2, Vector3};
use std::io::BufRead;
use std::path::Path;

/// Position, normal and UV indices are kept separate: a corner may use a
/// different index into each array.
fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}

/// Loads every shape of an OBJ file as its own [`RawMesh`].
///
/// Materials referenced by the file are not used; textures are attached to
/// the model explicitly.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<Vec<RawMesh>, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    info!("Loading OBJ file: {}", path.display());

    let (models, _materials) =
        tobj::load_obj(path, &load_options()).map_err(|source| LoadError::Obj {
            path: path.to_path_buf(),
            source,
        })?;

    let meshes = convert_models(&models)?;
    log_summary(&meshes);
    Ok(meshes)
}

/// Same as [`load_obj`] but parses OBJ text from a reader. `mtllib`
/// statements are ignored.
pub fn load_obj_from_reader<R: BufRead>(reader: &mut R) -> Result<Vec<RawMesh>, LoadError> {
    let (models, _materials) =
        tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))
            .map_err(|source| LoadError::Obj {
                path: "<memory>".into(),
                source,
            })?;

    convert_models(&models)
}

fn convert_models(models: &[tobj::Model]) -> Result<Vec<RawMesh>, LoadError> {
    if models.is_empty() {
        warn!("OBJ data contains no shapes");
    }

    models
        .iter()
        .map(|model| {
            raw_mesh_from_tobj(model).map_err(|source| LoadError::Mesh {
                name: model.name.clone(),
                source,
            })
        })
        .collect()
}

/// Converts one imported shape into a [`RawMesh`], keeping the corner order
/// produced by the importer.
pub fn raw_mesh_from_tobj(model: &tobj::Model) -> Result<RawMesh, MeshError> {
    let mesh = &model.mesh;
    let corners = mesh.indices.len();

    if corners % 3 != 0 {
        return Err(MeshError::NotTriangulated { corners });
    }
    if corners > 0 && (mesh.normals.is_empty() || mesh.normal_indices.len() != corners) {
        return Err(MeshError::MissingAttribute(AttributeKind::Normal));
    }
    if corners > 0 && (mesh.texcoords.is_empty() || mesh.texcoord_indices.len() != corners) {
        return Err(MeshError::MissingAttribute(AttributeKind::TexCoord));
    }

    let positions = mesh
        .positions
        .chunks_exact(3)
        .map(|p| Point3::new(p[0], p[1], p[2]))
        .collect();
    let normals = mesh
        .normals
        .chunks_exact(3)
        .map(|n| Vector3::new(n[0], n[1], n[2]))
        .collect();
    let texcoords = mesh
        .texcoords
        .chunks_exact(2)
        .map(|t| Vector2::new(t[0], t[1]))
        .collect();

    let corners = mesh
        .indices
        .iter()
        .zip(&mesh.normal_indices)
        .zip(&mesh.texcoord_indices)
        .map(|((&position, &normal), &texcoord)| CornerIndex::new(position, normal, texcoord))
        .collect();

    Ok(RawMesh {
        name: model.name.clone(),
        positions,
        normals,
        texcoords,
        corners,
    })
}

fn log_summary(meshes: &[RawMesh]) {
    let triangles: usize = meshes.iter().map(RawMesh::triangle_count).sum();
    info!(
        "OBJ loaded successfully. Shapes: {}, Total triangles: {}",
        meshes.len(),
        triangles
    );
}
