//! Assigns a [`Category`] to every intersection vertex by looking at the
//! closest distinct points before and after it on both boundaries.

use log::trace;

use crate::{fsize, Point2D, ClipConfig};
use crate::category::Category;
use crate::traversal::{PolygonType, TraversalGraph};
use crate::utils::{Wedge, WedgeFill};

/// Classifies all intersection vertices. Each vertex of the subject list is
/// classified once, its twin receives the dual category.
pub(crate) fn classify_intersections(graph: &mut TraversalGraph, config: &ClipConfig) {
    let subject = PolygonType::Subject;
    let indices: Vec<usize> = graph[subject].iter()
        .filter(|&i| graph[subject][i].kind.is_intersection())
        .collect();

    for i in indices {
        let category = classify_vertex(graph, subject, i, config.epsilon);
        let p = graph[subject][i].point;
        trace!("classified ({}, {}) as {:?}", p.x, p.y, category);
        graph.set_category(subject, i, category, true);
    }
}

/// Local neighbourhood of an intersection on one boundary
struct Neighbourhood {
    here: Point2D,
    prev: Point2D,
    next: Point2D,
    fill: WedgeFill,
}

impl Neighbourhood {

    fn of(graph: &TraversalGraph, side: PolygonType, index: usize, epsilon: fsize) -> Self {
        let list = &graph[side];
        let prev = list.distinct_prev(index);
        let next = list.distinct_next(index);
        let fill = if prev == next {
            list.spike_fill(index, epsilon)
        } else {
            WedgeFill::Empty
        };
        Neighbourhood { here: list[index].point, prev, next, fill }
    }

    #[inline]
    fn is_spike(&self) -> bool {
        self.prev == self.next
    }

    #[inline]
    fn wedge(&self) -> Wedge {
        Wedge::new(&self.prev, &self.here, &self.next, self.fill)
    }

    /// Is the point `p` on the interior side of the boundary, close to this vertex?
    #[inline]
    fn covers(&self, p: &Point2D, epsilon: fsize) -> bool {
        self.wedge().contains(&(*p - self.here), epsilon)
    }
}

/// Category of vertex `index` of the list `side`, seen from that list.
///
/// # Panics
///
/// If the vertex has no twin
pub(crate) fn classify_vertex(graph: &TraversalGraph, side: PolygonType, index: usize, epsilon: fsize) -> Category {
    use crate::category::Category::*;

    let twin = match graph[side][index].twin {
        Some(t) => t,
        None => panic!("intersection vertex {} has no twin", index),
    };

    let lhs = Neighbourhood::of(graph, side, index, epsilon);
    let rhs = Neighbourhood::of(graph, side.other(), twin, epsilon);

    let (a, b) = (lhs.prev, lhs.next);
    let (c, d) = (rhs.prev, rhs.next);

    if a == c && b == d {
        return AlignedOverlapToAlignedOverlap;
    }
    if a == d && b == c {
        return ReversedOverlapToReversedOverlap;
    }

    if lhs.is_spike() {
        let cw = lhs.fill == WedgeFill::Full;
        if a == d {
            return if cw { ReversedOverlapToAlignedOverlapCW } else { ReversedOverlapToAlignedOverlapCCW };
        }
        if a == c {
            return if cw { AlignedOverlapToReversedOverlapCW } else { AlignedOverlapToReversedOverlapCCW };
        }
    }

    if rhs.is_spike() && (c == a || c == b) {
        return classify_vertex(graph, side.other(), twin, epsilon).dual();
    }

    if b == d {
        return if rhs.covers(&a, epsilon) { InsideToAlignedOverlap } else { OutsideToAlignedOverlap };
    }
    if a == c {
        return if rhs.covers(&b, epsilon) { AlignedOverlapToInside } else { AlignedOverlapToOutside };
    }
    if a == d {
        return if rhs.covers(&b, epsilon) { ReversedOverlapToInside } else { ReversedOverlapToOutside };
    }
    if b == c {
        return if rhs.covers(&a, epsilon) { InsideToReversedOverlap } else { OutsideToReversedOverlap };
    }

    match (rhs.covers(&a, epsilon), rhs.covers(&b, epsilon)) {
        (true, false) => CrossInsideToOutside,
        (false, true) => CrossOutsideToInside,
        (true, true) => if lhs.covers(&d, epsilon) { TouchInsideToInside } else { TouchInsideToOutside },
        (false, false) => if lhs.covers(&d, epsilon) { TouchOutsideToInside } else { TouchOutsideToOutside },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Polygon, fsize};
    use crate::category::Category::*;
    use crate::intersection::find_intersections;

    fn square(x: fsize, y: fsize, size: fsize) -> Polygon {
        Polygon::from_coords(&[(x, y), (x + size, y), (x + size, y + size), (x, y + size)])
    }

    fn classified(a: &Polygon, b: &Polygon) -> TraversalGraph {
        let cfg = ClipConfig::default();
        let isects = find_intersections(a, b, &cfg);
        let mut graph = TraversalGraph::build(a, b, &isects, &cfg);
        classify_intersections(&mut graph, &cfg);
        graph
    }

    fn category_at(graph: &TraversalGraph, side: PolygonType, x: fsize, y: fsize) -> Vec<Category> {
        let list = &graph[side];
        list.iter()
            .filter(|&i| list[i].point == Point2D::new(x, y) && list[i].kind.is_intersection())
            .map(|i| list[i].category)
            .collect()
    }

    /// Every twin carries the dual, and classifying the twin directly agrees with it
    fn assert_dual_consistent(graph: &TraversalGraph) {
        let eps = ClipConfig::default().epsilon;
        for side in [PolygonType::Subject, PolygonType::Clipping].iter().copied() {
            let list = &graph[side];
            for i in list.iter().filter(|&i| list[i].kind.is_intersection()) {
                let twin = list[i].twin.unwrap();
                assert_eq!(graph[side.other()][twin].category, list[i].category.dual());
                assert_eq!(classify_vertex(graph, side, i, eps), list[i].category, "at {:?}", list[i].point);
            }
        }
    }

    #[test]
    fn test_crossing() {
        let graph = classified(&square(0.0, 0.0, 4.0), &square(2.0, 2.0, 4.0));
        assert_eq!(category_at(&graph, PolygonType::Subject, 4.0, 2.0), vec![CrossOutsideToInside]);
        assert_eq!(category_at(&graph, PolygonType::Subject, 2.0, 4.0), vec![CrossInsideToOutside]);
        assert_eq!(category_at(&graph, PolygonType::Clipping, 4.0, 2.0), vec![CrossInsideToOutside]);
        assert_dual_consistent(&graph);
    }

    #[test]
    fn test_outside_touch() {
        // the tip of the triangle touches the bottom edge of the square from outside
        let a = square(0.0, 0.0, 4.0);
        let b = Polygon::from_coords(&[(1.0, -2.0), (3.0, -2.0), (2.0, 0.0)]);
        let graph = classified(&a, &b);
        assert_eq!(category_at(&graph, PolygonType::Subject, 2.0, 0.0), vec![TouchOutsideToOutside]);
        assert_dual_consistent(&graph);
    }

    #[test]
    fn test_inside_touch() {
        // the tip of the triangle touches the bottom edge of the square from inside
        let a = square(0.0, 0.0, 4.0);
        let b = Polygon::from_coords(&[(2.0, 0.0), (3.0, 2.0), (1.0, 2.0)]);
        let graph = classified(&a, &b);
        assert_eq!(category_at(&graph, PolygonType::Subject, 2.0, 0.0), vec![TouchOutsideToInside]);
        assert_eq!(category_at(&graph, PolygonType::Clipping, 2.0, 0.0), vec![TouchInsideToOutside]);
        assert_dual_consistent(&graph);
    }

    #[test]
    fn test_aligned_overlap() {
        // b sits on the bottom edge of a, inside of it
        let a = square(0.0, 0.0, 4.0);
        let b = Polygon::from_coords(&[(1.0, 0.0), (3.0, 0.0), (3.0, 2.0), (1.0, 2.0)]);
        let graph = classified(&a, &b);
        assert_eq!(category_at(&graph, PolygonType::Subject, 1.0, 0.0), vec![OutsideToAlignedOverlap]);
        assert_eq!(category_at(&graph, PolygonType::Subject, 3.0, 0.0), vec![AlignedOverlapToOutside]);
        assert_eq!(category_at(&graph, PolygonType::Clipping, 1.0, 0.0), vec![InsideToAlignedOverlap]);
        assert_eq!(category_at(&graph, PolygonType::Clipping, 3.0, 0.0), vec![AlignedOverlapToInside]);
        assert_dual_consistent(&graph);
    }

    #[test]
    fn test_reversed_overlap() {
        // b sits below a, sharing part of the bottom edge
        let a = square(0.0, 0.0, 4.0);
        let b = Polygon::from_coords(&[(1.0, -2.0), (3.0, -2.0), (3.0, 0.0), (1.0, 0.0)]);
        let graph = classified(&a, &b);
        assert_eq!(category_at(&graph, PolygonType::Subject, 1.0, 0.0), vec![OutsideToReversedOverlap]);
        assert_eq!(category_at(&graph, PolygonType::Subject, 3.0, 0.0), vec![ReversedOverlapToOutside]);
        assert_dual_consistent(&graph);
    }

    #[test]
    fn test_identical_polygons_fully_aligned() {
        let a = square(0.0, 0.0, 4.0);
        let graph = classified(&a, &a.shifted(2));
        let subject = &graph[PolygonType::Subject];
        assert_eq!(subject.len(), 4);
        for i in subject.iter() {
            assert_eq!(subject[i].category, AlignedOverlapToAlignedOverlap);
        }
    }

    #[test]
    fn test_needle_crossed_by_edge() {
        let b = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 2.0), (8.0, 2.0), (4.0, 2.0), (4.0, 4.0), (0.0, 4.0)]);
        let a = square(5.0, -1.0, 6.0);
        let graph = classified(&a, &b);
        // the left edge of a runs down through the zero-width needle
        let cats = category_at(&graph, PolygonType::Subject, 5.0, 2.0);
        assert_eq!(cats, vec![CrossOutsideToInside, CrossInsideToOutside]);
        assert_dual_consistent(&graph);
    }
}
