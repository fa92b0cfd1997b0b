//! wgpu-backed vertex buffers. Device/queue come from whoever owns the surface.

use wgpu::{Buffer, BufferUsages, Device, Queue, util::DeviceExt};

use crate::{BufferId, RenderBackend, RenderError, RenderResult, check_size};

pub struct WgpuBackend<'a> {
    device: &'a Device,
    queue: &'a Queue,
    buffers: Vec<Buffer>,
}

impl<'a> WgpuBackend<'a> {
    pub fn new(device: &'a Device, queue: &'a Queue) -> Self {
        Self {
            device,
            queue,
            buffers: Vec::new(),
        }
    }

    /// Raw buffer for `set_vertex_buffer`.
    pub fn buffer(&self, id: BufferId) -> Option<&Buffer> {
        self.buffers.get(id.0 as usize)
    }

    fn get(&self, id: BufferId) -> RenderResult<&Buffer> {
        self.buffer(id).ok_or(RenderError::UnknownBuffer(id))
    }
}

impl RenderBackend for WgpuBackend<'_> {
    fn create_vertex_buffer(&mut self, label: &str, contents: &[u8]) -> BufferId {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            });
        let id = BufferId(self.buffers.len() as u32);
        self.buffers.push(buffer);
        id
    }

    fn write_vertex_buffer(&mut self, id: BufferId, contents: &[u8]) -> RenderResult<()> {
        let buffer = self.get(id)?;
        check_size(id, buffer.size(), contents)?;
        self.queue.write_buffer(buffer, 0, contents);
        Ok(())
    }

    fn buffer_size(&self, id: BufferId) -> RenderResult<u64> {
        Ok(self.get(id)?.size())
    }
}
