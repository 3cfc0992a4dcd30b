use crate::{fsize, Point2D, Bbox, ClipConfig};
use crate::segment::Segment;
use crate::utils::{calculate_signed_area, calculate_winding_number, calculate_winding_order};

/// Simple polygon, implicitly closed (the last node connects to the first).
///
/// The boolean operations expect counter-clockwise polygons. Holes in a
/// result are returned as separate, clockwise polygons.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    /// The points that this polygon is made of
    pub nodes: Vec<Point2D>,
}

/// Winding order of a polygon
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
}

impl Polygon {

    pub fn new(nodes: Vec<Point2D>) -> Self {
        Self { nodes }
    }

    /// Shorthand for building a polygon out of coordinate pairs
    pub fn from_coords(coords: &[(fsize, fsize)]) -> Self {
        Self { nodes: coords.iter().map(|&c| Point2D::from(c)).collect() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Segment starting at node `index`, wrapping around at the end
    #[inline]
    pub fn segment(&self, index: usize) -> Segment {
        let n = self.nodes.len();
        Segment::new(self.nodes[index % n], self.nodes[(index + 1) % n])
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.nodes.len()).map(move |i| self.segment(i))
    }

    /// Positive for counter-clockwise polygons
    pub fn signed_area(&self) -> fsize {
        calculate_signed_area(&self.nodes)
    }

    /// # Panics
    ///
    /// If the polygon has less than three nodes
    pub fn winding_order(&self) -> WindingOrder {
        calculate_winding_order(&self.nodes)
    }

    pub fn winding_number(&self, p: &Point2D) -> i32 {
        calculate_winding_number(&self.nodes, p)
    }

    /// Winding-number containment test, orientation independent
    pub fn contains(&self, p: &Point2D) -> bool {
        self.winding_number(p) != 0
    }

    /// Is `p` on one of the segments, up to the tolerance of `config`?
    pub fn on_boundary(&self, p: &Point2D, config: &ClipConfig) -> bool {
        let tolerance = config.epsilon * p.x.abs().max(p.y.abs()).max(1.0);
        self.segments().any(|s| s.distance_to(p) <= tolerance)
    }

    pub fn bounding_box(&self) -> Bbox {
        Bbox::from_points(&self.nodes)
    }

    /// Removes consecutive identical nodes, including a last node equal to the first one
    pub fn dedup(&self) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.dedup();
        while nodes.len() > 1 && nodes.first() == nodes.last() {
            nodes.pop();
        }
        Self { nodes }
    }

    /// Same boundary, opposite orientation
    pub fn reversed(&self) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.reverse();
        Self { nodes }
    }

    /// Same boundary, starting at node `k`
    pub fn shifted(&self, k: usize) -> Self {
        let mut nodes = self.nodes.clone();
        if !nodes.is_empty() {
            let n = nodes.len();
            nodes.rotate_left(k % n);
        }
        Self { nodes }
    }

    /// Equal nodes in equal order, up to the choice of the first node
    pub fn is_cyclic_permutation_of(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.is_empty() {
            return true;
        }
        let n = self.len();
        (0..n).any(|k| (0..n).all(|i| self.nodes[(i + k) % n] == other.nodes[i]))
    }

    /// Parts of `self` that are also covered by `other`
    ///
    /// Both polygons must be simple and counter-clockwise.
    /// Polygons with less than three distinct nodes yield an empty result.
    pub fn intersection(&self, other: &Self) -> Vec<Self> {
        crate::algorithm::intersection(self, other)
    }

    /// Parts of `self` that are not covered by `other`
    ///
    /// If `other` lies strictly inside `self`, the result is `[self, other.reversed()]`,
    /// the second polygon being the hole.
    pub fn difference(&self, other: &Self) -> Vec<Self> {
        crate::algorithm::difference(self, other)
    }
}
