//! Various types related to graph matching.

/// The vertex id type.
///
/// Vertex ids are dense, so they index the per-vertex buffers of a graph directly.
pub type VId = usize;

/// The vertex label type as it appears in the input.
pub type VLabel = i64;

/// The dense label type, in `[0, num_labels)`.
pub type Label = usize;
