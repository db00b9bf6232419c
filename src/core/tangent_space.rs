//! Per-triangle tangent frames for tangent-space normal mapping.
//!
//! Every triangle gets one tangent/bitangent pair derived from its edges and
//! UV deltas, and that pair is copied to all three of its corners. Frames are
//! not averaged across triangles that share a vertex.

use crate::core::geometry::RawMesh;
use crate::error::MeshError;
use log::debug;
use nalgebra::{Point3, Vector2, Vector3};
use rayon::prelude::*;

/// Tangent and bitangent of one triangle corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentBasis {
    pub tangent: Vector3<f32>,
    pub bitangent: Vector3<f32>,
}

impl TangentBasis {
    /// Gram-Schmidt: makes the tangent unit length and perpendicular to
    /// `normal`, then rebuilds the bitangent as `n x t`, keeping the
    /// handedness of the original frame.
    ///
    /// Returns the frame unchanged when the normal is zero or the tangent is
    /// parallel to it.
    pub fn orthogonalized(&self, normal: &Vector3<f32>) -> Self {
        let Some(n) = normal.try_normalize(1e-12) else {
            return *self;
        };
        let Some(t) = (self.tangent - n * n.dot(&self.tangent)).try_normalize(1e-12) else {
            return *self;
        };

        let b = n.cross(&t);
        let handedness = if b.dot(&self.bitangent) < 0.0 { -1.0 } else { 1.0 };

        Self {
            tangent: t,
            bitangent: b * handedness,
        }
    }
}

/// Controls the tangent pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TangentOptions {
    /// Orthonormalize each corner's frame against that corner's normal.
    /// Off by default, which keeps the raw per-face frame.
    pub orthogonalize: bool,
}

/// Computes the tangent frame of a single triangle.
///
/// `positions` and `uvs` are given in winding order. Returns `None` when the
/// UV mapping is degenerate, i.e. the texture-space determinant is zero (or
/// so close to zero that its reciprocal overflows).
pub fn triangle_tangent_basis(
    positions: [Point3<f32>; 3],
    uvs: [Vector2<f32>; 3],
) -> Option<TangentBasis> {
    let edge1 = positions[1] - positions[0];
    let edge2 = positions[2] - positions[0];

    let delta_uv1 = uvs[1] - uvs[0];
    let delta_uv2 = uvs[2] - uvs[0];

    let det = delta_uv1.x * delta_uv2.y - delta_uv1.y * delta_uv2.x;
    if det == 0.0 {
        return None;
    }
    let r = 1.0 / det;
    if !r.is_finite() {
        return None;
    }

    Some(TangentBasis {
        tangent: (edge1 * delta_uv2.y - edge2 * delta_uv1.y) * r,
        bitangent: (edge2 * delta_uv1.x - edge1 * delta_uv2.x) * r,
    })
}

/// Runs the tangent pass over a whole mesh and returns one frame per corner,
/// aligned with `mesh.corners`.
///
/// Triangles are processed in parallel. On failure the lowest offending
/// triangle is reported, so the result does not depend on scheduling.
pub fn corner_tangents(
    mesh: &RawMesh,
    options: &TangentOptions,
) -> Result<Vec<TangentBasis>, MeshError> {
    mesh.validate()?;

    let per_triangle = (0..mesh.triangle_count())
        .into_par_iter()
        .map(|triangle| -> Result<Option<[TangentBasis; 3]>, MeshError> {
            let corners = mesh.triangle(triangle)?;
            let basis = triangle_tangent_basis(
                [corners[0].position, corners[1].position, corners[2].position],
                [corners[0].texcoord, corners[1].texcoord, corners[2].texcoord],
            );
            Ok(basis.map(|basis| {
                if options.orthogonalize {
                    corners.map(|c| basis.orthogonalized(&c.normal))
                } else {
                    [basis; 3]
                }
            }))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut frames = Vec::with_capacity(mesh.corner_count());
    for (triangle, corners) in per_triangle.into_iter().enumerate() {
        let corners = corners.ok_or(MeshError::DegenerateUv { triangle })?;
        frames.extend_from_slice(&corners);
    }

    debug!(
        "Computed tangent frames for '{}': {} triangles, orthogonalize={}",
        mesh.name,
        mesh.triangle_count(),
        options.orthogonalize
    );

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::CornerIndex;
    use crate::error::AttributeKind;

    fn assert_vec_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual - expected).norm() < 1e-6,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn unit_square_corner() -> ([Point3<f32>; 3], [Vector2<f32>; 3]) {
        (
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            [
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(0.0, 1.0),
            ],
        )
    }

    fn mesh_from(positions: Vec<Point3<f32>>, texcoords: Vec<Vector2<f32>>) -> RawMesh {
        let corners = (0..positions.len() as u32)
            .map(|i| CornerIndex::new(i, 0, i))
            .collect();
        RawMesh {
            name: "test".to_string(),
            positions,
            normals: vec![Vector3::z()],
            texcoords,
            corners,
        }
    }

    #[test]
    fn unit_uv_square_maps_onto_axes() {
        let (positions, uvs) = unit_square_corner();
        let basis = triangle_tangent_basis(positions, uvs).unwrap();
        assert_eq!(basis.tangent, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(basis.bitangent, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn frame_is_not_normalized() {
        let basis = triangle_tangent_basis(
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(0.0, 4.0, 0.0),
            ],
            unit_square_corner().1,
        )
        .unwrap();
        assert_vec_eq(basis.tangent, Vector3::new(2.0, 0.0, 0.0));
        assert_vec_eq(basis.bitangent, Vector3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn swapping_winding_flips_det_and_numerators_together() {
        // v2<->v3 and uv2<->uv3: det goes from 1 to -1 and both numerators
        // change sign with it, so the frame comes out identical.
        let basis = triangle_tangent_basis(
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
            ],
            [
                Vector2::new(0.0, 0.0),
                Vector2::new(0.0, 1.0),
                Vector2::new(1.0, 0.0),
            ],
        )
        .unwrap();
        assert_vec_eq(basis.tangent, Vector3::new(1.0, 0.0, 0.0));
        assert_vec_eq(basis.bitangent, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn mirrored_uvs_swap_tangent_and_bitangent() {
        // Only uv2<->uv3: det is -1 while the positions keep their order.
        let (positions, _) = unit_square_corner();
        let basis = triangle_tangent_basis(
            positions,
            [
                Vector2::new(0.0, 0.0),
                Vector2::new(0.0, 1.0),
                Vector2::new(1.0, 0.0),
            ],
        )
        .unwrap();
        assert_vec_eq(basis.tangent, Vector3::new(0.0, 1.0, 0.0));
        assert_vec_eq(basis.bitangent, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn collapsed_uvs_have_no_frame() {
        let (positions, _) = unit_square_corner();
        let uv = Vector2::new(0.25, 0.75);
        assert_eq!(triangle_tangent_basis(positions, [uv; 3]), None);
    }

    #[test]
    fn collinear_uvs_have_no_frame() {
        let (positions, _) = unit_square_corner();
        let uvs = [
            Vector2::new(0.0, 0.0),
            Vector2::new(0.5, 0.5),
            Vector2::new(1.0, 1.0),
        ];
        assert_eq!(triangle_tangent_basis(positions, uvs), None);
    }

    #[test]
    fn subnormal_determinant_has_no_frame() {
        // det = 1e-39 is nonzero but subnormal; its reciprocal overflows f32.
        let (du, dv) = (1e-20f32, 1e-19f32);
        let det = du * dv;
        assert!(det != 0.0 && !(1.0 / det).is_finite());

        let (positions, _) = unit_square_corner();
        let uvs = [
            Vector2::new(0.0, 0.0),
            Vector2::new(du, 0.0),
            Vector2::new(0.0, dv),
        ];
        assert_eq!(triangle_tangent_basis(positions, uvs), None);

        let mesh = mesh_from(positions.to_vec(), uvs.to_vec());
        assert_eq!(
            corner_tangents(&mesh, &TangentOptions::default()),
            Err(MeshError::DegenerateUv { triangle: 0 })
        );
    }

    #[test]
    fn every_corner_of_a_triangle_gets_the_same_frame() {
        let mesh = mesh_from(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(3.0, 0.0, 1.0),
                Point3::new(0.0, 2.0, 2.0),
            ],
            vec![
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(0.0, 1.0),
                Vector2::new(0.1, 0.2),
                Vector2::new(0.7, 0.3),
                Vector2::new(0.2, 0.9),
            ],
        );
        let frames = corner_tangents(&mesh, &TangentOptions::default()).unwrap();
        assert_eq!(frames.len(), 6);
        for tri in frames.chunks_exact(3) {
            assert_eq!(tri[0], tri[1]);
            assert_eq!(tri[1], tri[2]);
        }
        assert_ne!(frames[0], frames[3]);
    }

    #[test]
    fn degenerate_triangle_is_named() {
        let mut positions = unit_square_corner().0.to_vec();
        positions.extend_from_slice(&unit_square_corner().0);
        let mut texcoords = unit_square_corner().1.to_vec();
        texcoords.extend_from_slice(&[Vector2::new(0.5, 0.5); 3]);
        let mesh = mesh_from(positions, texcoords);

        assert_eq!(
            corner_tangents(&mesh, &TangentOptions::default()),
            Err(MeshError::DegenerateUv { triangle: 1 })
        );
    }

    #[test]
    fn bad_index_is_reported_before_tangents() {
        let (positions, uvs) = unit_square_corner();
        let mut mesh = mesh_from(positions.to_vec(), uvs.to_vec());
        mesh.corners[2].position = 10;
        assert_eq!(
            corner_tangents(&mesh, &TangentOptions::default()),
            Err(MeshError::IndexOutOfBounds {
                triangle: 0,
                corner: 2,
                attribute: AttributeKind::Position,
                index: 10,
                len: 3,
            })
        );
    }

    #[test]
    fn orthogonalize_projects_out_the_normal() {
        let raw = TangentBasis {
            tangent: Vector3::new(2.0, 0.0, 1.0),
            bitangent: Vector3::new(0.0, -4.0, 0.0),
        };
        let frame = raw.orthogonalized(&Vector3::new(0.0, 0.0, 2.0));
        assert_vec_eq(frame.tangent, Vector3::new(1.0, 0.0, 0.0));
        // n x t = +y, the raw bitangent points to -y: handedness is kept.
        assert_vec_eq(frame.bitangent, Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn orthogonalize_keeps_frame_for_zero_normal() {
        let raw = TangentBasis {
            tangent: Vector3::new(2.0, 0.0, 0.0),
            bitangent: Vector3::new(0.0, 4.0, 0.0),
        };
        assert_eq!(raw.orthogonalized(&Vector3::zeros()), raw);
    }

    #[test]
    fn orthogonalize_option_applies_per_corner() {
        let (positions, uvs) = unit_square_corner();
        let mut mesh = mesh_from(positions.to_vec(), uvs.to_vec());
        mesh.normals = vec![Vector3::z(), Vector3::new(1.0, 0.0, 1.0)];
        mesh.corners[1].normal = 1;

        let frames = corner_tangents(&mesh, &TangentOptions { orthogonalize: true }).unwrap();
        assert_vec_eq(frames[0].tangent, Vector3::new(1.0, 0.0, 0.0));
        assert_ne!(frames[0], frames[1]);
        for frame in &frames {
            assert!((frame.tangent.norm() - 1.0).abs() < 1e-6);
        }
    }
}
