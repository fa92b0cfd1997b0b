//! CPU-side mesh representation produced by loaders.

use corelib::{Vec2, Vec3, Vec4};

/// Interleaved vertex with position/normal/uv. Values are in object space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeshVertex {
    pub position: [f32; 4],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub fn new(position: Vec4, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }
}

/// Non-indexed triangle list: three parallel arrays, one entry per triangle corner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<Vec4>,
    pub normals: Vec<Vec3>,
    pub texcoords: Vec<Vec2>,
}

impl MeshData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            texcoords: Vec::with_capacity(vertices),
        }
    }

    /// Append one triangle corner.
    #[inline]
    pub fn push(&mut self, position: Vec4, normal: Vec3, texcoord: Vec2) {
        self.positions.push(position);
        self.normals.push(normal);
        self.texcoords.push(texcoord);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Positions of triangle `i`, or `None` past the end.
    pub fn triangle(&self, i: usize) -> Option<[Vec4; 3]> {
        let base = i.checked_mul(3)?;
        match self.positions.get(base..base.checked_add(3)?)? {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Returns `true` if the mesh holds whole triangles and the arrays line up.
    pub fn is_valid(&self) -> bool {
        let n = self.positions.len();
        n > 0 && n % 3 == 0 && self.normals.len() == n && self.texcoords.len() == n
    }

    /// Interleave the parallel arrays for upload.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = MeshVertex> + '_ {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.texcoords)
            .map(|((p, n), t)| MeshVertex::new(*p, *n, *t))
    }
}
