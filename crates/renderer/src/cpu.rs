//! In-memory backend for headless runs and tests.

use crate::{BufferId, RenderBackend, RenderError, RenderResult, check_size};

#[derive(Debug)]
struct CpuBuffer {
    label: String,
    data: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct CpuBackend {
    buffers: Vec<CpuBuffer>,
    bytes_written: u64,
}

impl CpuBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, id: BufferId) -> RenderResult<&CpuBuffer> {
        self.buffers
            .get(id.0 as usize)
            .ok_or(RenderError::UnknownBuffer(id))
    }

    pub fn contents(&self, id: BufferId) -> Option<&[u8]> {
        self.buffers.get(id.0 as usize).map(|b| b.data.as_slice())
    }

    /// Buffer contents reinterpreted as `f32`s (copied, so alignment is not an issue).
    pub fn floats(&self, id: BufferId) -> Option<Vec<f32>> {
        self.contents(id).map(bytemuck::pod_collect_to_vec::<u8, f32>)
    }

    pub fn label(&self, id: BufferId) -> Option<&str> {
        self.buffers.get(id.0 as usize).map(|b| b.label.as_str())
    }

    #[inline]
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    /// Total bytes uploaded or rewritten so far.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl RenderBackend for CpuBackend {
    fn create_vertex_buffer(&mut self, label: &str, contents: &[u8]) -> BufferId {
        let id = BufferId(self.buffers.len() as u32);
        self.buffers.push(CpuBuffer {
            label: label.to_owned(),
            data: contents.to_vec(),
        });
        self.bytes_written += contents.len() as u64;
        id
    }

    fn write_vertex_buffer(&mut self, id: BufferId, contents: &[u8]) -> RenderResult<()> {
        let expected = self.buffer_size(id)?;
        check_size(id, expected, contents)?;
        let buf = self
            .buffers
            .get_mut(id.0 as usize)
            .ok_or(RenderError::UnknownBuffer(id))?;
        buf.data.copy_from_slice(contents);
        self.bytes_written += contents.len() as u64;
        Ok(())
    }

    fn buffer_size(&self, id: BufferId) -> RenderResult<u64> {
        Ok(self.get(id)?.data.len() as u64)
    }
}
