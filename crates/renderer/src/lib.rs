//! Renderer binding: turns CPU-side mesh/particle data into backend vertex
//! buffers and the draw calls that go with them. The backend is passed in
//! explicitly; nothing here owns a global GPU context.

use thiserror::Error;

pub mod binding;
pub mod cpu;
pub mod gpu;
pub mod vertex;

pub use binding::{GpuMesh, PointCloud};
pub use cpu::CpuBackend;
pub use gpu::WgpuBackend;
pub use vertex::{GpuVertex, PointVertex};

/// Handle for a vertex buffer owned by a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    TriangleList,
    PointList,
}

/// Non-indexed draw over a whole vertex buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawCall {
    pub buffer: BufferId,
    pub topology: Topology,
    pub vertex_count: u32,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unknown buffer {0:?}")]
    UnknownBuffer(BufferId),
    #[error("Buffer {id:?} holds {expected} bytes, got {actual}")]
    SizeMismatch {
        id: BufferId,
        expected: u64,
        actual: u64,
    },
    #[error("Mesh is not a whole triangle list ({vertices} vertices)")]
    InvalidMesh { vertices: usize },
    #[error("Too many vertices for one draw ({0})")]
    TooManyVertices(usize),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Where vertex data ends up. Buffers keep their size for life; rewrites must
/// match it.
pub trait RenderBackend {
    fn create_vertex_buffer(&mut self, label: &str, contents: &[u8]) -> BufferId;

    fn write_vertex_buffer(&mut self, id: BufferId, contents: &[u8]) -> RenderResult<()>;

    fn buffer_size(&self, id: BufferId) -> RenderResult<u64>;
}

/// Shared size check for backends.
pub(crate) fn check_size(id: BufferId, expected: u64, contents: &[u8]) -> RenderResult<()> {
    let actual = contents.len() as u64;
    if actual != expected {
        return Err(RenderError::SizeMismatch {
            id,
            expected,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn vertex_count(len: usize) -> RenderResult<u32> {
    u32::try_from(len).map_err(|_| RenderError::TooManyVertices(len))
}
