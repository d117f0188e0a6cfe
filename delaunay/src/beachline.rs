use std::cmp::Ordering;

use crate::container::{Handle, OrderedTree, Place};
use crate::geometry::{compare_breakpoint, Point};
use crate::mesh::{PointId, TriId};

/// A beachline node. Despite the name, this tracks a *breakpoint*: the
/// boundary between the arc focused at `p0` (to its left) and the arc
/// focused at `p1` (to its right), plus the triangle that boundary will
/// complete. `tri` always has `vertices[1] == Some(p0)`, `vertices[2] ==
/// Some(p1)`, and an apex at `vertices[0]` that is filled in once known —
/// either by a later site event inheriting this node's triangle, or by the
/// circle event at which the arc focused at `p1` (from this node's
/// perspective) vanishes.
#[derive(Clone, Copy)]
pub struct Arc {
    pub p0: PointId,
    pub p1: PointId,
    pub tri: TriId,
}

/// The ordered sequence of breakpoints sweeping left to right. Logically
/// circular — the beachline wraps around — which `locate` accounts for
/// explicitly; the underlying tree itself is a plain linear order.
pub struct Beachline {
    tree: OrderedTree<Arc>,
}

impl Beachline {
    pub fn new() -> Self {
        Self {
            tree: OrderedTree::new(),
        }
    }

    pub fn insert_root(&mut self, arc: Arc) -> Handle {
        self.tree.insert_root(arc)
    }

    pub fn insert_at(&mut self, place: Place, arc: Arc) -> Handle {
        self.tree.insert_at(place, arc)
    }

    pub fn get(&self, h: Handle) -> &Arc {
        self.tree.get(h)
    }

    pub fn get_mut(&mut self, h: Handle) -> &mut Arc {
        self.tree.get_mut(h)
    }

    pub fn next(&self, h: Handle) -> Option<Handle> {
        self.tree.next(h)
    }

    pub fn prev(&self, h: Handle) -> Option<Handle> {
        self.tree.prev(h)
    }

    pub fn remove(&mut self, h: Handle) {
        self.tree.remove(h)
    }

    /// Finds the breakpoints immediately surrounding `query` at the current
    /// sweep-y (`query.y`), wrapping around the ends of the tree since the
    /// beachline is logically circular. Returns `(before, after, place)`
    /// where `place` is where a new pair of breakpoints should be inserted
    /// to split the arc between `before` and `after`.
    pub fn locate(&self, points: &[Point], query: Point) -> (Handle, Handle, Place) {
        let (leaf, ord) = self
            .tree
            .find_place(|arc| compare_breakpoint(points[arc.p0], points[arc.p1], query))
            .expect("locate: beachline is empty");

        match ord {
            Ordering::Less => {
                let before = self.tree.prev(leaf).unwrap_or_else(|| self.tree.last().unwrap());
                (before, leaf, Place::Before(leaf))
            }
            _ => {
                let after = self.tree.next(leaf).unwrap_or_else(|| self.tree.first().unwrap());
                (leaf, after, Place::After(leaf))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_wraps_around_the_ends() {
        let points = vec![Point::new(-1.0, 0.0), Point::new(1.0, 0.0)];
        let mut line = Beachline::new();
        let h0 = line.insert_root(Arc { p0: 0, p1: 1, tri: 0 });
        line.insert_at(Place::After(h0), Arc { p0: 1, p1: 0, tri: 1 });

        // A query far to either side must still land between the two arcs
        // (wrapping past whichever end the tree search falls off).
        let (before, after, _) = line.locate(&points, Point::new(-100.0, -5.0));
        assert_ne!(before, after);
        let (before, after, _) = line.locate(&points, Point::new(100.0, -5.0));
        assert_ne!(before, after);
    }
}
