use crate::{fsize, Point2D};
use crate::polygon::WindingOrder;

/// Sign of a triangle
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Sign {
    Positive,
    Negative,
    Equal,
}

/// Calculate the sign of the triangle (p1, p2, o)
#[inline]
pub(crate) fn calculate_sign(p0: &Point2D, p1: &Point2D, o: &Point2D) -> Sign {
    let det = (p0.x - o.x) * (p1.y - o.y) - (p1.x - o.x) * (p0.y - o.y);
    if det < 0.0 {
        Sign::Negative
    } else if det > 0.0 {
        Sign::Positive
    } else {
        Sign::Equal
    }
}

/// Is `p` strictly left of the directed line `a -> b`?
#[inline]
pub fn is_point_left_of_line(a: &Point2D, b: &Point2D, p: &Point2D) -> bool {
    calculate_sign(a, b, p) == Sign::Positive
}

/// Calculates the signed area of a closed polygon with the shoelace formula in O(n) time.
/// Positive for counter-clockwise polygons.
pub fn calculate_signed_area(nodes: &[Point2D]) -> fsize {
    if nodes.len() < 3 {
        return 0.0;
    }

    let iter1 = nodes.iter();
    let mut iter2 = nodes.iter().cycle();
    iter2.next();

    let twice: fsize = iter1.zip(iter2).map(|(p0, p1)| p0.cross(p1)).sum();
    twice * 0.5
}

/// Calculates the winding order of a polygon using the gaussian shoelace formula in O(n) time
///
/// # Panics
///
/// You must validate that there are at least three points in the nodes
/// (otherwise, there is no winding order, it's just a point or a line)
pub fn calculate_winding_order(nodes: &[Point2D]) -> WindingOrder {

    // cannot happen, since the parent function should
    // take care of early returning on invalid polygons
    assert!(nodes.len() > 2);

    match calculate_signed_area(nodes) < 0.0 {
        true  => WindingOrder::Clockwise,
        false => WindingOrder::CounterClockwise,
    }
}

/// Winding number of `p` with respect to the closed polyline `nodes` (Sunday's algorithm).
/// Counter-clockwise loops around `p` count +1, clockwise loops -1.
pub fn calculate_winding_number(nodes: &[Point2D], p: &Point2D) -> i32 {
    let mut winding = 0;

    let iter1 = nodes.iter();
    let mut iter2 = nodes.iter().cycle();
    iter2.next();

    for (a, b) in iter1.zip(iter2) {
        if a.y <= p.y {
            if b.y > p.y && calculate_sign(a, b, p) == Sign::Positive {
                winding += 1;
            }
        } else if b.y <= p.y && calculate_sign(a, b, p) == Sign::Negative {
            winding -= 1;
        }
    }

    winding
}

/// Interior of a polygon around one of its boundary points:
/// the counter-clockwise sweep from the outgoing to the incoming direction
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Wedge {
    pub(crate) outgoing: Point2D,
    pub(crate) incoming: Point2D,
    /// Only consulted when both directions coincide (the boundary doubles back)
    pub(crate) fill: WedgeFill,
}

/// Whether a zero-angle wedge is a needle sticking out of the polygon
/// or a slit cut into it
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum WedgeFill {
    Empty,
    Full,
}

impl Wedge {

    /// `prev -> here -> next` is the boundary walked in polygon order
    pub(crate) fn new(prev: &Point2D, here: &Point2D, next: &Point2D, fill: WedgeFill) -> Self {
        Wedge {
            outgoing: *next - *here,
            incoming: *prev - *here,
            fill,
        }
    }

    pub(crate) fn is_degenerate(&self, epsilon: fsize) -> bool {
        is_same_direction(&self.outgoing, &self.incoming, epsilon)
    }

    /// Does the direction `dir` point strictly into the wedge?
    /// `dir` must not be collinear with either boundary ray.
    pub(crate) fn contains(&self, dir: &Point2D, epsilon: fsize) -> bool {
        if self.is_degenerate(epsilon) {
            return self.fill == WedgeFill::Full;
        }

        let turn = self.outgoing.cross(&self.incoming);
        if turn > 0.0 {
            self.outgoing.cross(dir) > 0.0 && dir.cross(&self.incoming) > 0.0
        } else if turn < 0.0 {
            !(self.incoming.cross(dir) >= 0.0 && dir.cross(&self.outgoing) >= 0.0)
        } else {
            // straight boundary, the wedge is the left half plane
            self.outgoing.cross(dir) > 0.0
        }
    }
}

/// Decides whether a spike with its tip at `tip` is a needle pointing out of
/// the polygon or a slit cut into it.
///
/// `backward` and `forward` yield the boundary points walking away from the
/// tip in both directions, without consecutive repetitions. Both walks follow
/// the doubled-back shaft until they split up at the junction; the spike is a
/// slit if the shaft points into the interior there.
pub(crate) fn spike_fill<B, F>(mut backward: B, mut forward: F, tip: Point2D, epsilon: fsize) -> WedgeFill
    where B: Iterator<Item = Point2D>,
          F: Iterator<Item = Point2D>,
{
    let mut junction = tip;
    loop {
        match (backward.next(), forward.next()) {
            (Some(pp), Some(nn)) if pp == nn => junction = pp,
            (Some(pp), Some(nn)) => {
                if junction == tip {
                    // not a spike at all
                    return WedgeFill::Empty;
                }
                let wedge = Wedge::new(&pp, &junction, &nn, WedgeFill::Empty);
                return if wedge.contains(&(tip - junction), epsilon) {
                    WedgeFill::Full
                } else {
                    WedgeFill::Empty
                };
            },
            _ => return WedgeFill::Empty,
        }
    }
}

/// Points of the closed polyline `nodes`, walking away from `start`,
/// without consecutive repetitions. Stops after one full round.
pub(crate) fn walk_distinct(nodes: &[Point2D], start: usize, forward: bool) -> impl Iterator<Item = Point2D> + '_ {
    let n = nodes.len();
    let mut last = nodes[start];
    let mut cur = start;
    let mut remaining = n.saturating_sub(1);
    ::std::iter::from_fn(move || {
        while remaining > 0 {
            remaining -= 1;
            cur = if forward { (cur + 1) % n } else { (cur + n - 1) % n };
            if nodes[cur] != last {
                last = nodes[cur];
                return Some(last);
            }
        }
        None
    })
}

/// Are `a` and `b` parallel and pointing the same way (up to a relative `epsilon`)?
#[inline]
pub(crate) fn is_same_direction(a: &Point2D, b: &Point2D, epsilon: fsize) -> bool {
    a.cross(b).abs() <= epsilon * a.length() * b.length() && a.dot(b) > 0.0
}
