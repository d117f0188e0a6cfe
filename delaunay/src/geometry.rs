use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};

use ordered_float::OrderedFloat;

/// A point in the plane. Coordinates are totally ordered so that `Point` can
/// key events and beachline arcs without running into `f64`'s partial order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: OrderedFloat<f64>,
    pub y: OrderedFloat<f64>,
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x.into_inner(), self.y.into_inner())
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.x.into_inner(), self.y.into_inner())
    }
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: OrderedFloat(x),
            y: OrderedFloat(y),
        }
    }

    /// Dot product.
    pub fn dot(self, other: Point) -> OrderedFloat<f64> {
        self.x * other.x + self.y * other.y
    }

    /// Perp-dot (2D cross) product: `self.x * other.y - self.y * other.x`.
    pub fn cross(self, other: Point) -> OrderedFloat<f64> {
        self.x * other.y - self.y * other.x
    }

    /// Rotate 90 degrees counter-clockwise: `(x, y) -> (-y, x)`.
    pub fn perp(self) -> Point {
        Point {
            x: -self.y,
            y: self.x,
        }
    }

    pub fn length_squared(self) -> OrderedFloat<f64> {
        self.dot(self)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<OrderedFloat<f64>> for Point {
    type Output = Self;

    fn mul(self, rhs: OrderedFloat<f64>) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// `(y, x)` sweep order: ascending y, ties broken by ascending x. This is the
/// key used for both site and circle events.
pub fn sweep_key(p: Point) -> (OrderedFloat<f64>, OrderedFloat<f64>) {
    (p.y, p.x)
}

fn sqrt(v: OrderedFloat<f64>) -> OrderedFloat<f64> {
    OrderedFloat(v.into_inner().sqrt())
}

/// Result of trying to build a circle event for the beachline triple
/// `(p0, p1, p2)`, per spec.md §4.2.
pub struct CircleEvent {
    pub center: Point,
    /// Sweep-y at which the arc for `p1` vanishes: `center.y + circumradius`.
    pub vanish_y: OrderedFloat<f64>,
}

/// Attempts to build the circle event for the consecutive beachline triple
/// `(p0, p1, p2)` — `p1` is the middle (vanishing) arc's focus. Mirrors
/// `QueueEvent::triangle` in the original C++ source verbatim.
///
/// Returns `None` when `p0 == p2` (the triple is degenerate, bounded by the
/// same site on both sides) or when the perp-dot `r x d <= 0` (the three foci
/// curve the wrong way and the arc never vanishes).
pub fn circle_event(p0: Point, p1: Point, p2: Point) -> Option<CircleEvent> {
    if p0 == p2 {
        return None;
    }

    let half = OrderedFloat(0.5);
    let r0 = (p0 + p2) * half;
    let r = p1 - r0;
    let d = p2 - p0;
    let s = r.cross(d);
    if s <= OrderedFloat(0.0) {
        return None;
    }

    let four = OrderedFloat(4.0);
    let dd4 = d.length_squared() / four;
    let h = (r.length_squared() - dd4) / s;
    let center = r0 + d.perp() * (h * half);
    let radius_sq = dd4 * (OrderedFloat(1.0) + h * h);
    let vanish_y = center.y + sqrt(radius_sq);

    Some(CircleEvent { center, vanish_y })
}

/// Orders the query `v` against the right breakpoint of the arc `(p0, p1)`
/// (the arc whose focus is `p1`, preceded by the arc with focus `p0`) at
/// sweep-y `v.y`, per spec.md §4.1. `Ordering::Less` means `v` falls left of
/// the breakpoint, `Ordering::Greater` means right. The two branches below
/// are algebraically equivalent re-derivations of the same quadratic root,
/// chosen to avoid cancellation; preserve both verbatim.
pub fn compare_breakpoint(p0: Point, p1: Point, v: Point) -> Ordering {
    let zero = OrderedFloat(0.0);
    let d = p1 - p0;

    if d.y == zero {
        if d.x <= zero {
            return Ordering::Greater;
        }
        if v.y <= p0.y {
            return if v.x > p1.x {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
    }

    let y1 = v.y - p0.y;
    let y2 = v.y - p1.y;
    let w = y1 * y2 * OrderedFloat(4.0);

    let rhs = if d.x > zero {
        let denom = d.x * (y1 + y2) + sqrt(w * d.length_squared());
        let t = (d.x * d.x - w) / denom;
        p0.x + p1.x + t * d.y
    } else {
        let t = d.x * (y1 + y2) - sqrt(w * d.length_squared());
        p0.x + p1.x + t / d.y
    };

    if v.x * OrderedFloat(2.0) > rhs {
        Ordering::Greater
    } else {
        Ordering::Less
    }
}
