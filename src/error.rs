//! Error management.

use crate::types::VId;
use derive_more::Display;

#[derive(Debug, Display, PartialEq)]
pub enum Error {
    #[display(fmt = "io error: {}", _0)]
    Io(String),
    #[display(fmt = "line {}: {}", line, message)]
    Parse { line: usize, message: String },
    #[display(fmt = "expected {} {}, found {}", expected, what, found)]
    CountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[display(fmt = "vertex {} is out of range [0, {})", _0, _1)]
    VertexOutOfRange(VId, usize),
    #[display(fmt = "vertex {} is listed twice", _0)]
    DuplicateVertex(VId),
    #[display(fmt = "self loop on vertex {}", _0)]
    SelfLoop(VId),
    #[display(fmt = "query graph has no vertices")]
    EmptyQuery,
    #[display(fmt = "query graph is not connected")]
    DisconnectedQuery,
    #[display(fmt = "number of samples must be positive")]
    ZeroSamples,
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
