use crate::core::geometry::{CornerIndex, FLOATS_PER_VERTEX, InterleavedVertex, RawMesh};
use crate::core::interleave::assemble_interleaved;
use crate::core::tangent_space::{TangentOptions, corner_tangents};
use crate::error::MeshError;
use log::debug;
use nalgebra::{Point3, Vector2, Vector3};

/// A triangle mesh ready for upload: one interleaved vertex per triangle
/// corner, no index buffer. Immutable once built.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    vertices: Vec<InterleavedVertex>,
}

impl Mesh {
    /// Validates `raw`, runs the tangent pass and packs the interleaved
    /// buffer. A failed build returns no mesh at all.
    pub fn build(raw: &RawMesh, options: &TangentOptions) -> Result<Self, MeshError> {
        let frames = corner_tangents(raw, options)?;
        let vertices = assemble_interleaved(raw, &frames)?;

        debug!(
            "Built mesh '{}': {} triangles, {} floats",
            raw.name,
            raw.triangle_count(),
            vertices.len() * FLOATS_PER_VERTEX
        );

        Ok(Self {
            name: raw.name.clone(),
            vertices,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[InterleavedVertex] {
        &self.vertices
    }

    /// Number of vertices to draw (`GL_TRIANGLES` count).
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// The buffer as `14 * vertex_count()` floats.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The buffer as raw bytes, for upload or export.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// A single counter-clockwise triangle facing +Z with a unit UV mapping.
    pub fn test_triangle() -> RawMesh {
        RawMesh {
            name: "test_triangle".to_string(),
            positions: vec![
                Point3::new(-0.5, -0.5, 0.0),
                Point3::new(0.5, -0.5, 0.0),
                Point3::new(-0.5, 0.5, 0.0),
            ],
            normals: vec![Vector3::z()],
            texcoords: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(0.0, 1.0),
            ],
            corners: vec![
                CornerIndex::new(0, 0, 0),
                CornerIndex::new(1, 0, 1),
                CornerIndex::new(2, 0, 2),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttributeKind;

    #[test]
    fn right_triangle_frame_lands_in_buffer() {
        let raw = RawMesh {
            name: "unit".to_string(),
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            ..Mesh::test_triangle()
        };
        let mesh = Mesh::build(&raw, &TangentOptions::default()).unwrap();

        assert_eq!(mesh.as_floats().len(), 14 * 3);
        for v in mesh.vertices() {
            assert_eq!(v.tangent, [1.0, 0.0, 0.0]);
            assert_eq!(v.bitangent, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn buffer_length_is_fourteen_floats_per_corner() {
        let mut raw = Mesh::test_triangle();
        raw.corners = raw.corners.repeat(5);
        let mesh = Mesh::build(&raw, &TangentOptions::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 15);
        assert_eq!(mesh.triangle_count(), 5);
        assert_eq!(mesh.as_floats().len(), 14 * 15);
        assert_eq!(mesh.as_bytes().len(), 56 * 15);
    }

    #[test]
    fn corners_of_one_triangle_share_bit_identical_frames() {
        let raw = RawMesh {
            positions: vec![
                Point3::new(0.3, -1.2, 0.7),
                Point3::new(2.1, 0.4, -0.9),
                Point3::new(-0.6, 1.7, 0.2),
            ],
            texcoords: vec![
                Vector2::new(0.13, 0.91),
                Vector2::new(0.77, 0.35),
                Vector2::new(0.41, 0.02),
            ],
            ..Mesh::test_triangle()
        };
        let mesh = Mesh::build(&raw, &TangentOptions::default()).unwrap();
        let bits = |v: &InterleavedVertex| {
            let frame = [v.tangent, v.bitangent].concat();
            frame.iter().map(|f| f.to_bits()).collect::<Vec<u32>>()
        };
        let first = bits(&mesh.vertices()[0]);
        assert_eq!(first, bits(&mesh.vertices()[1]));
        assert_eq!(first, bits(&mesh.vertices()[2]));
    }

    #[test]
    fn position_index_past_the_end_is_malformed() {
        let mut raw = Mesh::test_triangle();
        raw.corners[1].position = 3;
        let err = Mesh::build(&raw, &TangentOptions::default()).unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(
            err,
            MeshError::IndexOutOfBounds {
                triangle: 0,
                corner: 1,
                attribute: AttributeKind::Position,
                index: 3,
                len: 3,
            }
        );
    }

    #[test]
    fn collapsed_uv_triangle_is_degenerate() {
        let raw = RawMesh {
            texcoords: vec![Vector2::new(0.5, 0.5)],
            corners: vec![
                CornerIndex::new(0, 0, 0),
                CornerIndex::new(1, 0, 0),
                CornerIndex::new(2, 0, 0),
            ],
            ..Mesh::test_triangle()
        };
        assert_eq!(
            Mesh::build(&raw, &TangentOptions::default()).unwrap_err(),
            MeshError::DegenerateUv { triangle: 0 }
        );
    }

    #[test]
    fn empty_mesh_builds_an_empty_buffer() {
        let mesh = Mesh::build(&RawMesh::default(), &TangentOptions::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 0);
        assert!(mesh.as_floats().is_empty());
    }
}
