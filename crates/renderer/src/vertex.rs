//! GPU vertex layouts.

use std::mem::size_of;

use asset::MeshVertex;
use corelib::Vec3;
use bytemuck::{Pod, Zeroable};
use wgpu::{VertexBufferLayout, VertexStepMode};

/// Mesh vertex: homogeneous position + normal + uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub pos: [f32; 4],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl GpuVertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: size_of::<GpuVertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x3, 2 => Float32x2],
    };
}

impl From<MeshVertex> for GpuVertex {
    fn from(v: MeshVertex) -> Self {
        Self {
            pos: v.position,
            normal: v.normal,
            uv: v.uv,
        }
    }
}

/// Particle vertex: world-space position only.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub pos: [f32; 3],
}

impl PointVertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: size_of::<PointVertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
    };
}

impl From<Vec3> for PointVertex {
    fn from(p: Vec3) -> Self {
        Self { pos: p.to_array() }
    }
}
