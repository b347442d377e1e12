use derive_more::Display;

#[derive(Debug, Display, PartialEq)]
#[display(
    fmt = "num_vertices: {}\nnum_edges: {}\nnum_labels: {}\nmax_degree: {}",
    num_vertices,
    num_edges,
    num_labels,
    max_degree
)]
pub struct GraphInfo {
    num_vertices: usize,
    num_edges: usize,
    num_labels: usize,
    max_degree: usize,
}

impl GraphInfo {
    pub fn new(num_vertices: usize, num_edges: usize, num_labels: usize, max_degree: usize) -> Self {
        Self {
            num_vertices,
            num_edges,
            num_labels,
            max_degree,
        }
    }
}
