/// Index of a point in the caller's input slice. The library never copies or
/// owns points; every reference to a site is one of these.
pub type PointId = usize;

/// Index of a triangle inside a [`TriangleArena`].
pub type TriId = usize;

/// A neighbor reference: the triangle on the far side of an edge, and which
/// of *its* three edges is the shared one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriRef {
    pub tri: TriId,
    pub edge: u8,
}

/// One triangle slot. `vertices[i]` is `None` only for the permanent ghost
/// apex of a hull-boundary triangle; `neighbors[i]` is the triangle sharing
/// the edge opposite `vertices[i]`, and is `None` only transiently, between a
/// triangle's allocation and the connect calls that immediately follow it —
/// every triangle that survives to [`TriangleArena::into_triangles`] has all
/// three neighbors set, since the sweep mesh has no open boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Option<PointId>; 3],
    pub neighbors: [Option<TriRef>; 3],
}

/// Owns every triangle produced by a sweep. Triangles are appended and never
/// removed; a [`TriId`] stays valid for the arena's whole lifetime.
pub struct TriangleArena {
    tris: Vec<Triangle>,
}

impl TriangleArena {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            tris: Vec::with_capacity(n),
        }
    }

    pub fn alloc(&mut self, v0: Option<PointId>, v1: Option<PointId>, v2: Option<PointId>) -> TriId {
        let id = self.tris.len();
        self.tris.push(Triangle {
            vertices: [v0, v1, v2],
            neighbors: [None, None, None],
        });
        id
    }

    pub fn get(&self, id: TriId) -> &Triangle {
        &self.tris[id]
    }

    pub fn set_vertex(&mut self, id: TriId, slot: usize, v: PointId) {
        self.tris[id].vertices[slot] = Some(v);
    }

    /// Direct connect: links edge `e1` of `t1` to edge `e2` of `t2` and vice
    /// versa. Mirrors the original's 4-argument `connect(Triangle*, int,
    /// Triangle*, int)` overload.
    pub fn connect(&mut self, t1: TriId, e1: u8, t2: TriId, e2: u8) {
        self.tris[t1].neighbors[e1 as usize] = Some(TriRef { tri: t2, edge: e2 });
        self.tris[t2].neighbors[e2 as usize] = Some(TriRef { tri: t1, edge: e1 });
    }

    /// Read-through connect: links edge `e1` of `t1` to whatever `existing`
    /// already points at, and updates that far side to point back at `t1`.
    /// Used when a triangle is being repurposed and must inherit a neighbor
    /// relationship its previous identity held. Mirrors the original's
    /// 3-argument `connect(Triangle*, int, const TriRef&)` overload.
    pub fn connect_through(&mut self, t1: TriId, e1: u8, existing: TriRef) {
        self.tris[t1].neighbors[e1 as usize] = Some(existing);
        self.tris[existing.tri].neighbors[existing.edge as usize] = Some(TriRef { tri: t1, edge: e1 });
    }

    pub fn len(&self) -> usize {
        self.tris.len()
    }

    pub fn into_triangles(self) -> Vec<Triangle> {
        self.tris
    }
}
