//! Mesh loading errors. The first one encountered aborts the load.

use std::fmt;

use corelib::SourceError;
use thiserror::Error;

/// Which per-file pool an index points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pool {
    Position,
    TexCoord,
    Normal,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pool::Position => "position",
            Pool::TexCoord => "texcoord",
            Pool::Normal => "normal",
        })
    }
}

#[derive(Debug, Error)]
pub enum MeshError {
    /// Unparseable (or missing, `token` empty) number/index on a line.
    #[error("Line {line}: cannot parse {what} from '{token}'")]
    Parse {
        line: usize,
        token: String,
        what: &'static str,
    },
    #[error("Line {line}: face has {corners} corner(s), at least 3 required")]
    MalformedFace { line: usize, corners: usize },
    #[error("Line {line}: {pool} index {index} out of range (len={len})")]
    IndexOutOfRange {
        line: usize,
        pool: Pool,
        index: i64,
        len: usize,
    },
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl MeshError {
    /// 1-based line the error was raised on, if it came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            MeshError::Parse { line, .. }
            | MeshError::MalformedFace { line, .. }
            | MeshError::IndexOutOfRange { line, .. } => Some(*line),
            MeshError::Source(_) => None,
        }
    }
}

pub type MeshResult<T> = Result<T, MeshError>;
