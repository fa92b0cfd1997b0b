//! Core shared types: math re-exports, the text-loading collaborator and its errors.

pub use glam::{Vec2, Vec3, Vec4, vec2, vec3, vec4};

pub mod error;
pub mod source;

pub use error::{SourceError, SourceResult};
pub use source::{FileSource, MemorySource, TextSource};
