//! Asset loading/parsers.
//! OBJ-style text meshes expanded into a flat, non-indexed triangle soup.

pub mod error;
pub mod mesh;
pub mod obj;

pub use error::{MeshError, MeshResult, Pool};
pub use mesh::{MeshData, MeshVertex};
