use crate::scene::mesh::Mesh;
use crate::scene::model::Model;
use log::info;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extension of exported vertex buffers.
pub const VERTEX_BUFFER_EXT: &str = "vbo";

/// Writes the interleaved buffer of `mesh` as little-endian `f32`s, 56 bytes
/// per vertex, in the same layout the GPU receives.
pub fn save_vertex_buffer<P: AsRef<Path>>(mesh: &Mesh, path: P) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    if cfg!(target_endian = "little") {
        writer.write_all(mesh.as_bytes())?;
    } else {
        for value in mesh.as_floats() {
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    writer.flush()
}

/// Reads a buffer written by [`save_vertex_buffer`] back into floats.
pub fn read_vertex_buffer<P: AsRef<Path>>(path: P) -> io::Result<Vec<f32>> {
    let bytes = fs::read(path)?;
    if bytes.len() % 4 != 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} bytes is not a whole number of floats", bytes.len()),
        ));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// `<out_dir>/<model>_<index>_<mesh>.vbo`. The mesh index keeps meshes
/// with equal (or equally sanitized) names apart.
pub fn buffer_path(out_dir: &Path, model: &Model, index: usize, mesh: &Mesh) -> PathBuf {
    let mesh_name = if mesh.name().is_empty() {
        "mesh"
    } else {
        mesh.name()
    };
    out_dir.join(format!(
        "{}_{}_{}.{}",
        model.name(),
        index,
        sanitize(mesh_name),
        VERTEX_BUFFER_EXT
    ))
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Exports every mesh of `model` into `out_dir`, creating it if needed.
/// Returns the written paths in mesh order.
pub fn export_model(model: &Model, out_dir: &Path) -> io::Result<Vec<PathBuf>> {
    export_models(&[model], out_dir)
}

/// Exports several models into one directory. Fails before writing anything
/// if two buffers would land on the same file, e.g. models with the same
/// file stem from different directories.
pub fn export_models(models: &[&Model], out_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut planned = Vec::new();
    let mut taken = HashSet::new();
    for model in models {
        for (index, mesh) in model.meshes.iter().enumerate() {
            let path = buffer_path(out_dir, model, index, mesh);
            if !taken.insert(path.clone()) {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!(
                        "'{}' from {} would overwrite another exported buffer",
                        path.display(),
                        model.path.display()
                    ),
                ));
            }
            planned.push((path, mesh));
        }
    }

    fs::create_dir_all(out_dir)?;
    let mut written = Vec::with_capacity(planned.len());
    for (path, mesh) in planned {
        save_vertex_buffer(mesh, &path)?;
        info!(
            "Exported '{}' ({} vertices) to {}",
            mesh.name(),
            mesh.vertex_count(),
            path.display()
        );
        written.push(path);
    }
    Ok(written)
}
