use crate::mesh::{PointId, Triangle};

/// An undirected edge between two input points, by index.
pub type Edge = (PointId, PointId);

fn normalize(a: PointId, b: PointId) -> Edge {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Every undirected edge appearing in a mesh's real (non-ghost) triangles.
/// Used to check that two triangulations of the same point set, built from
/// different input orderings, agree on the actual edge set.
pub fn real_edges(triangles: &[Triangle]) -> Vec<Edge> {
    let mut edges = Vec::new();
    for t in triangles {
        if let [Some(a), Some(b), Some(c)] = t.vertices {
            edges.push(normalize(a, b));
            edges.push(normalize(b, c));
            edges.push(normalize(c, a));
        }
    }
    edges.sort_unstable();
    edges.dedup();
    edges
}
