use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;

use crate::beachline::{Arc, Beachline};
use crate::container::{Handle, Place};
use crate::geometry::{circle_event, sweep_key, Point};
use crate::mesh::{PointId, Triangle, TriangleArena};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Event {
    Site(PointId),
    /// Handle of the breakpoint whose right-hand arc may be vanishing.
    Circle(Handle),
}

type Priority = Reverse<(OrderedFloat<f64>, OrderedFloat<f64>)>;
type EventQueue = PriorityQueue<Event, Priority>;

fn priority_of(key: (OrderedFloat<f64>, OrderedFloat<f64>)) -> Priority {
    Reverse(key)
}

/// Recomputes (or clears) the pending circle event for the arc right of
/// `handle`, using `p2` as the third, far focus of the candidate triple.
/// Always removes any stale event first — a no-op if none was pending.
fn update_circle_event(eq: &mut EventQueue, points: &[Point], beachline: &Beachline, handle: Handle, p2: Point) {
    eq.remove(&Event::Circle(handle));
    let arc = *beachline.get(handle);
    if let Some(ev) = circle_event(points[arc.p0], points[arc.p1], p2) {
        eq.push(Event::Circle(handle), priority_of((ev.vanish_y, ev.center.x)));
    }
}

fn site_event(
    pid: PointId,
    points: &[Point],
    beachline: &mut Beachline,
    arena: &mut TriangleArena,
    eq: &mut EventQueue,
) {
    let p = points[pid];
    let (prev, next, place) = beachline.locate(points, p);

    let old_focus = beachline.get(prev).p1;
    let prev_tri = beachline.get(prev).tri;
    let next_tri = beachline.get(next).tri;
    debug_assert!(
        arena.get(prev_tri).neighbors.iter().any(Option::is_some)
            || arena.get(next_tri).neighbors.iter().any(Option::is_some),
        "located beachline gap has no stitched neighbor on either side"
    );

    let t0 = arena.alloc(None, Some(old_focus), Some(pid));
    let t1 = arena.alloc(None, Some(pid), Some(old_focus));

    arena.connect(t0, 0, t1, 0);
    arena.connect(t0, 1, t1, 2);
    arena.connect(t0, 2, prev_tri, 1);
    arena.connect(next_tri, 2, t1, 1);

    let bp1 = beachline.insert_at(place, Arc { p0: old_focus, p1: pid, tri: t0 });
    let bp2 = beachline.insert_at(Place::After(bp1), Arc { p0: pid, p1: old_focus, tri: t1 });

    update_circle_event(eq, points, beachline, prev, p);
    let far_right = beachline.get(next).p1;
    update_circle_event(eq, points, beachline, bp2, points[far_right]);
}

fn circle_event_handler(
    prev: Handle,
    points: &[Point],
    beachline: &mut Beachline,
    arena: &mut TriangleArena,
    eq: &mut EventQueue,
) {
    let next = beachline
        .next(prev)
        .expect("circle event arc has no right neighbor");

    let prev_arc = *beachline.get(prev);
    let next_arc = *beachline.get(next);

    arena.set_vertex(prev_arc.tri, 0, next_arc.p1);
    arena.set_vertex(next_arc.tri, 1, prev_arc.p0);

    let inherited_from_next = arena.get(next_arc.tri).neighbors[0].expect("unstitched triangle");
    arena.connect_through(prev_arc.tri, 1, inherited_from_next);
    let inherited_from_prev = arena.get(prev_arc.tri).neighbors[2].expect("unstitched triangle");
    arena.connect_through(next_arc.tri, 2, inherited_from_prev);
    arena.connect(prev_arc.tri, 2, next_arc.tri, 0);

    beachline.get_mut(next).p0 = prev_arc.p0;
    beachline.remove(prev);

    if let Some(left) = beachline.prev(next) {
        let far_right = beachline.get(next).p1;
        update_circle_event(eq, points, beachline, left, points[far_right]);
    }
    if let Some(right) = beachline.next(next) {
        let far_right = beachline.get(right).p1;
        update_circle_event(eq, points, beachline, next, points[far_right]);
    }
}

/// Writes the Delaunay triangulation of `points` into `triangles`, returning
/// the number of slots used (`0` if `points.len() < 2`). Panics if
/// `triangles` is smaller than the `2 * points.len() - 2` slots required.
pub fn triangulate_into(triangles: &mut [Triangle], points: &[Point]) -> usize {
    let result = triangulate(points);
    assert!(
        triangles.len() >= result.len(),
        "triangulate_into: destination has {} slots, need {}",
        triangles.len(),
        result.len()
    );
    let count = result.len();
    triangles[..count].clone_from_slice(&result);
    count
}

/// Computes the Delaunay triangulation of `points` via Fortune's sweepline.
/// Returns `2 * points.len() - 2` triangles, including hull-boundary ghost
/// triangles whose apex vertex is `None`. Returns an empty `Vec` if there are
/// fewer than two points.
pub fn triangulate(points: &[Point]) -> Vec<Triangle> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut arena = TriangleArena::with_capacity(2 * n - 2);
    let mut eq: EventQueue = PriorityQueue::new();
    for i in 0..n {
        eq.push(Event::Site(i), priority_of(sweep_key(points[i])));
    }

    let i1 = match eq.pop().expect("at least two points").0 {
        Event::Site(i) => i,
        Event::Circle(_) => unreachable!("queue seeded with only site events"),
    };
    let i2 = match eq.pop().expect("at least two points").0 {
        Event::Site(i) => i,
        Event::Circle(_) => unreachable!("queue seeded with only site events"),
    };

    let t0 = arena.alloc(None, Some(i1), Some(i2));
    let t1 = arena.alloc(None, Some(i2), Some(i1));
    arena.connect(t0, 0, t1, 0);
    arena.connect(t0, 1, t1, 2);
    arena.connect(t0, 2, t1, 1);

    let mut beachline = Beachline::new();
    let h0 = beachline.insert_root(Arc { p0: i1, p1: i2, tri: t0 });
    beachline.insert_at(Place::After(h0), Arc { p0: i2, p1: i1, tri: t1 });

    while let Some((event, _)) = eq.pop() {
        match event {
            Event::Site(pid) => site_event(pid, points, &mut beachline, &mut arena, &mut eq),
            Event::Circle(handle) => circle_event_handler(handle, points, &mut beachline, &mut arena, &mut eq),
        }
    }

    debug_assert_eq!(arena.len(), 2 * n - 2);
    arena.into_triangles()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ]
    }

    /// Every non-ghost vertex slot must point at a valid index, and every
    /// input point must be used by at least one triangle.
    fn assert_covers_all_points(triangles: &[Triangle], n: usize) {
        let mut seen = HashSet::new();
        for t in triangles {
            for v in t.vertices.iter().flatten() {
                assert!(*v < n, "vertex index {v} out of range for {n} points");
                seen.insert(*v);
            }
        }
        assert_eq!(seen.len(), n, "not every input point appears in the mesh");
    }

    /// Neighbor links must be mutually consistent: if A considers B its
    /// neighbor across edge e, B must consider A its neighbor across the
    /// edge it reported back.
    fn assert_neighbors_symmetric(triangles: &[Triangle]) {
        for (i, t) in triangles.iter().enumerate() {
            for (e, nb) in t.neighbors.iter().enumerate() {
                let nb = nb.expect("every triangle must have all three neighbors set");
                let back = triangles[nb.tri].neighbors[nb.edge as usize]
                    .expect("neighbor's neighbor slot must be set");
                assert_eq!(back.tri, i);
                assert_eq!(back.edge as usize, e);
            }
        }
    }

    #[test]
    fn empty_and_single_point_produce_nothing() {
        assert!(triangulate(&[]).is_empty());
        assert!(triangulate(&[Point::new(0.0, 0.0)]).is_empty());
    }

    #[test]
    fn two_points_produce_two_ghost_triangles() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        let triangles = triangulate(&points);
        assert_eq!(triangles.len(), 2);
        for t in &triangles {
            assert_eq!(t.vertices[0], None);
        }
        assert_neighbors_symmetric(&triangles);
    }

    #[test]
    fn three_points_produce_expected_triangle_count() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let triangles = triangulate(&points);
        assert_eq!(triangles.len(), 2 * points.len() - 2);
        assert_neighbors_symmetric(&triangles);
        assert_covers_all_points(&triangles, points.len());
    }

    #[test]
    fn unit_square_triangulates_into_two_real_triangles_and_two_hull_ghosts() {
        let points = square();
        let triangles = triangulate(&points);
        assert_eq!(triangles.len(), 2 * points.len() - 2);
        assert_neighbors_symmetric(&triangles);
        assert_covers_all_points(&triangles, points.len());

        let real: Vec<_> = triangles
            .iter()
            .filter(|t| t.vertices.iter().all(Option::is_some))
            .collect();
        assert_eq!(real.len(), 2, "a convex quadrilateral splits into exactly two real triangles");
    }

    #[test]
    fn collinear_points_do_not_panic() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
        ];
        let triangles = triangulate(&points);
        assert_eq!(triangles.len(), 2 * points.len() - 2);
        assert_neighbors_symmetric(&triangles);
    }

    #[test]
    fn seeded_random_points_produce_a_consistent_mesh() {
        let mut rng = StdRng::seed_from_u64(7);
        let points: Vec<Point> = (0..100)
            .map(|_| Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
            .collect();

        let triangles = triangulate(&points);
        assert_eq!(triangles.len(), 2 * points.len() - 2);
        assert_neighbors_symmetric(&triangles);
        assert_covers_all_points(&triangles, points.len());
    }

    #[test]
    fn triangulate_into_matches_triangulate() {
        let points = square();
        let expected = triangulate(&points);
        let mut buf = vec![
            Triangle {
                vertices: [None, None, None],
                neighbors: [None, None, None],
            };
            expected.len()
        ];
        let count = triangulate_into(&mut buf, &points);
        assert_eq!(count, expected.len());
        assert_eq!(buf, expected);
    }

    #[test]
    #[should_panic(expected = "destination has")]
    fn triangulate_into_panics_on_undersized_buffer() {
        let points = square();
        let mut buf = vec![Triangle {
            vertices: [None, None, None],
            neighbors: [None, None, None],
        }];
        triangulate_into(&mut buf, &points);
    }

    #[test]
    fn permuting_input_order_does_not_change_the_edge_set() {
        use crate::test_utils::real_edges;

        let points = square();
        let mut shuffled = points.clone();
        shuffled.reverse();

        let a = triangulate(&points);
        let b = triangulate(&shuffled);
        assert_eq!(a.len(), b.len());

        let to_geometric = |edges: Vec<(usize, usize)>, pts: &[Point]| -> HashSet<(Point, Point)> {
            edges
                .into_iter()
                .map(|(i, j)| {
                    let (p, q) = (pts[i], pts[j]);
                    if p <= q {
                        (p, q)
                    } else {
                        (q, p)
                    }
                })
                .collect()
        };

        let edges_a = to_geometric(real_edges(&a), &points);
        let edges_b = to_geometric(real_edges(&b), &shuffled);
        assert_eq!(edges_a, edges_b);
    }
}
