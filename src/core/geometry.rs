use crate::error::{AttributeKind, MeshError};
use bytemuck::{Pod, Zeroable};
use nalgebra::{Point3, Vector2, Vector3};

/// One triangle corner: separate indices into the position, normal and UV
/// arrays, as non-unified formats like OBJ store them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerIndex {
    pub position: u32,
    pub normal: u32,
    pub texcoord: u32,
}

impl CornerIndex {
    pub fn new(position: u32, normal: u32, texcoord: u32) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }

    /// Same index into all three arrays.
    pub fn unified(index: u32) -> Self {
        Self::new(index, index, index)
    }
}

/// Attribute values resolved for a single corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerAttributes {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub texcoord: Vector2<f32>,
}

/// Triangle mesh as handed over by an importer: raw attribute arrays plus
/// the corner stream, three corners per triangle in winding order.
#[derive(Debug, Clone, Default)]
pub struct RawMesh {
    pub name: String,
    pub positions: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub texcoords: Vec<Vector2<f32>>,
    pub corners: Vec<CornerIndex>,
}

impl RawMesh {
    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.corners.len() / 3
    }

    /// Checks that the corner stream is triangle aligned and that every
    /// index stays inside its array. Reports the first offending corner.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.corners.len() % 3 != 0 {
            return Err(MeshError::NotTriangulated {
                corners: self.corners.len(),
            });
        }
        if self.corners.is_empty() {
            return Ok(());
        }

        if self.positions.is_empty() {
            return Err(MeshError::MissingAttribute(AttributeKind::Position));
        }
        if self.normals.is_empty() {
            return Err(MeshError::MissingAttribute(AttributeKind::Normal));
        }
        if self.texcoords.is_empty() {
            return Err(MeshError::MissingAttribute(AttributeKind::TexCoord));
        }

        for corner in 0..self.corners.len() {
            self.corner(corner)?;
        }
        Ok(())
    }

    /// Resolves the attributes of corner number `corner` in the stream.
    ///
    /// # Panics
    /// If `corner >= self.corner_count()`.
    pub fn corner(&self, corner: usize) -> Result<CornerAttributes, MeshError> {
        let index = self.corners[corner];
        Ok(CornerAttributes {
            position: lookup(&self.positions, index.position, AttributeKind::Position, corner)?,
            normal: lookup(&self.normals, index.normal, AttributeKind::Normal, corner)?,
            texcoord: lookup(&self.texcoords, index.texcoord, AttributeKind::TexCoord, corner)?,
        })
    }

    /// Resolves the three corners of triangle number `triangle`.
    pub fn triangle(&self, triangle: usize) -> Result<[CornerAttributes; 3], MeshError> {
        let first = triangle * 3;
        Ok([
            self.corner(first)?,
            self.corner(first + 1)?,
            self.corner(first + 2)?,
        ])
    }
}

fn lookup<T: Copy>(
    data: &[T],
    index: u32,
    attribute: AttributeKind,
    corner: usize,
) -> Result<T, MeshError> {
    data.get(index as usize)
        .copied()
        .ok_or(MeshError::IndexOutOfBounds {
            triangle: corner / 3,
            corner,
            attribute,
            index: index as usize,
            len: data.len(),
        })
}

/// Number of `f32`s per interleaved vertex.
pub const FLOATS_PER_VERTEX: usize = 14;

/// Byte distance between two consecutive vertices in the interleaved buffer.
pub const VERTEX_STRIDE: usize = FLOATS_PER_VERTEX * std::mem::size_of::<f32>();

/// One vertex as laid out in the GPU buffer:
/// `[px,py,pz, nx,ny,nz, u,v, tx,ty,tz, bx,by,bz]`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InterleavedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
    pub tangent: [f32; 3],
    pub bitangent: [f32; 3],
}

impl InterleavedVertex {
    pub fn new(
        position: &Point3<f32>,
        normal: &Vector3<f32>,
        texcoord: &Vector2<f32>,
        tangent: &Vector3<f32>,
        bitangent: &Vector3<f32>,
    ) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            normal: [normal.x, normal.y, normal.z],
            texcoord: [texcoord.x, texcoord.y],
            tangent: [tangent.x, tangent.y, tangent.z],
            bitangent: [bitangent.x, bitangent.y, bitangent.z],
        }
    }

    pub fn position(&self) -> Point3<f32> {
        Point3::from(self.position)
    }

    pub fn tangent(&self) -> Vector3<f32> {
        Vector3::from(self.tangent)
    }

    pub fn bitangent(&self) -> Vector3<f32> {
        Vector3::from(self.bitangent)
    }
}

/// Describes one attribute inside the interleaved vertex, in the terms a
/// `glVertexAttribPointer` / vertex-buffer-layout call needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    /// Shader input location.
    pub location: u32,
    /// Number of `f32` components.
    pub components: usize,
    /// Offset from the start of the vertex, in floats.
    pub offset: usize,
}

impl VertexAttribute {
    pub fn byte_offset(&self) -> usize {
        self.offset * std::mem::size_of::<f32>()
    }
}

/// Attribute table for [`InterleavedVertex`], in buffer order.
#[rustfmt::skip]
pub const VERTEX_ATTRIBUTES: [VertexAttribute; 5] = [
    VertexAttribute { name: "position", location: 0, components: 3, offset: 0 },
    VertexAttribute { name: "normal", location: 1, components: 3, offset: 3 },
    VertexAttribute { name: "texcoord", location: 2, components: 2, offset: 6 },
    VertexAttribute { name: "tangent", location: 3, components: 3, offset: 8 },
    VertexAttribute { name: "bitangent", location: 4, components: 3, offset: 11 },
];
