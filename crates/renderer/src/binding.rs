//! Adapters from CPU data to backend buffers.

use asset::MeshData;
use corelib::Vec3;

use crate::{
    BufferId, DrawCall, RenderBackend, RenderError, RenderResult, Topology,
    vertex::{GpuVertex, PointVertex},
    vertex_count,
};

/// Uploaded, immutable triangle list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GpuMesh {
    buffer: BufferId,
    vertex_count: u32,
}

impl GpuMesh {
    /// Interleave `mesh` and upload it as one vertex buffer.
    pub fn upload(
        backend: &mut impl RenderBackend,
        label: &str,
        mesh: &MeshData,
    ) -> RenderResult<Self> {
        if !mesh.is_valid() {
            return Err(RenderError::InvalidMesh {
                vertices: mesh.vertex_count(),
            });
        }
        let vertices: Vec<GpuVertex> = mesh.vertices().map(GpuVertex::from).collect();
        let vertex_count = vertex_count(vertices.len())?;
        let buffer = backend.create_vertex_buffer(label, bytemuck::cast_slice(&vertices));
        log::debug!("Uploaded mesh '{}': {} vertices as {:?}", label, vertex_count, buffer);
        Ok(Self {
            buffer,
            vertex_count,
        })
    }

    #[inline]
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    #[inline]
    pub fn draw_call(&self) -> DrawCall {
        DrawCall {
            buffer: self.buffer,
            topology: Topology::TriangleList,
            vertex_count: self.vertex_count,
        }
    }
}

/// Point buffer mirroring a particle position array. The particle count is
/// fixed at upload; `refresh` rewrites the buffer in place each frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointCloud {
    buffer: BufferId,
    count: u32,
}

impl PointCloud {
    pub fn upload(
        backend: &mut impl RenderBackend,
        label: &str,
        positions: &[Vec3],
    ) -> RenderResult<Self> {
        let count = vertex_count(positions.len())?;
        let buffer = backend.create_vertex_buffer(label, bytemuck::cast_slice(&point_vertices(positions)));
        log::debug!("Uploaded point cloud '{}': {} points as {:?}", label, count, buffer);
        Ok(Self { buffer, count })
    }

    pub fn refresh(&self, backend: &mut impl RenderBackend, positions: &[Vec3]) -> RenderResult<()> {
        backend.write_vertex_buffer(self.buffer, bytemuck::cast_slice(&point_vertices(positions)))
    }

    #[inline]
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn draw_call(&self) -> DrawCall {
        DrawCall {
            buffer: self.buffer,
            topology: Topology::PointList,
            vertex_count: self.count,
        }
    }
}

fn point_vertices(positions: &[Vec3]) -> Vec<PointVertex> {
    positions.iter().copied().map(PointVertex::from).collect()
}
