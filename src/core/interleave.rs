use crate::core::geometry::{InterleavedVertex, RawMesh};
use crate::core::tangent_space::TangentBasis;
use crate::error::MeshError;

/// Packs one [`InterleavedVertex`] per corner, in corner order.
///
/// Position, normal and UV come from the raw arrays through the corner's own
/// indices; the tangent frame is taken from `frames` at the corner's position
/// in the stream. Neither input is modified.
pub fn assemble_interleaved(
    mesh: &RawMesh,
    frames: &[TangentBasis],
) -> Result<Vec<InterleavedVertex>, MeshError> {
    let corners = mesh.corner_count();
    if corners % 3 != 0 {
        return Err(MeshError::NotTriangulated { corners });
    }
    if frames.len() != corners {
        return Err(MeshError::TangentStreamMismatch {
            corners,
            tangents: frames.len(),
        });
    }

    frames
        .iter()
        .enumerate()
        .map(|(corner, frame)| {
            let attributes = mesh.corner(corner)?;
            Ok(InterleavedVertex::new(
                &attributes.position,
                &attributes.normal,
                &attributes.texcoord,
                &frame.tangent,
                &frame.bitangent,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{CornerIndex, FLOATS_PER_VERTEX};
    use crate::error::AttributeKind;
    use nalgebra::{Point3, Vector2, Vector3};

    fn frame(t: f32, b: f32) -> TangentBasis {
        TangentBasis {
            tangent: Vector3::new(t, 0.0, 0.0),
            bitangent: Vector3::new(0.0, b, 0.0),
        }
    }

    fn quad() -> RawMesh {
        RawMesh {
            name: "quad".to_string(),
            positions: vec![
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(-1.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::z(), -Vector3::z()],
            texcoords: vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(0.0, 1.0),
            ],
            corners: vec![
                CornerIndex::new(0, 0, 0),
                CornerIndex::new(1, 0, 1),
                CornerIndex::new(2, 0, 2),
                CornerIndex::new(0, 1, 3),
                CornerIndex::new(2, 1, 1),
                CornerIndex::new(3, 1, 0),
            ],
        }
    }

    #[test]
    fn emits_one_vertex_per_corner_in_stream_order() {
        let mesh = quad();
        let mut frames = vec![frame(1.0, 1.0); 3];
        frames.extend([frame(2.0, 3.0); 3]);
        let vertices = assemble_interleaved(&mesh, &frames).unwrap();
        assert_eq!(vertices.len(), 6);

        let floats: &[f32] = bytemuck::cast_slice(&vertices);
        assert_eq!(floats.len(), FLOATS_PER_VERTEX * 6);

        // Corner 4: position 2, normal 1, uv 1, second triangle's frame.
        let v = &floats[4 * FLOATS_PER_VERTEX..5 * FLOATS_PER_VERTEX];
        assert_eq!(
            v,
            &[1.0, 1.0, 0.0, 0.0, 0.0, -1.0, 1.0, 0.0, 2.0, 0.0, 0.0, 0.0, 3.0, 0.0]
        );
    }

    #[test]
    fn frame_count_must_match_corners() {
        let mesh = quad();
        let frames = vec![frame(1.0, 1.0); 3];
        assert_eq!(
            assemble_interleaved(&mesh, &frames),
            Err(MeshError::TangentStreamMismatch {
                corners: 6,
                tangents: 3
            })
        );
    }

    #[test]
    fn out_of_range_normal_fails_instead_of_reading_past_the_end() {
        let mut mesh = quad();
        mesh.corners[5].normal = 2;
        let frames = vec![frame(1.0, 1.0); 6];
        assert_eq!(
            assemble_interleaved(&mesh, &frames),
            Err(MeshError::IndexOutOfBounds {
                triangle: 1,
                corner: 5,
                attribute: AttributeKind::Normal,
                index: 2,
                len: 2,
            })
        );
    }

    #[test]
    fn inputs_are_left_untouched() {
        let mesh = quad();
        let frames = vec![frame(1.0, 1.0); 6];
        let before = (mesh.corners.clone(), frames.clone());
        assemble_interleaved(&mesh, &frames).unwrap();
        assert_eq!(before, (mesh.corners, frames));
    }
}
