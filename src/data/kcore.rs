use crate::types::VId;

/// Computes the core number of every vertex of the graph given in CSR form.
///
/// Vertices are kept in buckets by their current degree and peeled from the lowest bucket
/// (Batagelj and Zaversnik), so the whole computation is `O(V + E)`. Within a bucket the
/// vertices start in id order.
pub(crate) fn core_numbers(offsets: &[usize], neighbors: &[VId]) -> Vec<usize> {
    let num_vertices = offsets.len().saturating_sub(1);
    let mut deg: Vec<usize> = offsets.windows(2).map(|w| w[1] - w[0]).collect();
    let max_deg = deg.iter().copied().max().unwrap_or(0);
    // bin[d] is the position of the first vertex of degree d in `vert`.
    let mut bin = vec![0; max_deg + 1];
    for &d in &deg {
        bin[d] += 1;
    }
    let mut start = 0;
    for b in bin.iter_mut() {
        let num = *b;
        *b = start;
        start += num;
    }
    let (mut pos, mut vert) = (vec![0; num_vertices], vec![0; num_vertices]);
    for v in 0..num_vertices {
        pos[v] = bin[deg[v]];
        vert[pos[v]] = v;
        bin[deg[v]] += 1;
    }
    for d in (1..=max_deg).rev() {
        bin[d] = bin[d - 1];
    }
    bin[0] = 0;
    for i in 0..num_vertices {
        let v = vert[i];
        for &u in &neighbors[offsets[v]..offsets[v + 1]] {
            if deg[u] > deg[v] {
                let (du, pu) = (deg[u], pos[u]);
                let pw = bin[du];
                let w = vert[pw];
                if u != w {
                    pos[u] = pw;
                    vert[pu] = w;
                    pos[w] = pu;
                    vert[pw] = u;
                }
                bin[du] += 1;
                deg[u] -= 1;
            }
        }
    }
    deg
}
