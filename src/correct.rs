//! Consistency fixes on the classified lists, for configurations the local
//! classification cannot see through.

use log::debug;

use crate::category::Category;
use crate::traversal::{PolygonType, TraversalGraph, VertexKind};

const SIDES: [PolygonType; 2] = [PolygonType::Subject, PolygonType::Clipping];

/// Runs all corrections, in order
pub(crate) fn correct_topology(graph: &mut TraversalGraph) {
    for &side in SIDES.iter() {
        remove_spike_pairs(graph, side);
    }
    for &side in SIDES.iter() {
        remove_duplicate_intersections(graph, side);
    }
    for &side in SIDES.iter() {
        reclassify_vertex_crossings(graph, side);
    }
}

/// Four intersections on the same spot whose twins pair up crosswise are a
/// spike narrower than the snapping tolerance; the inner two are dropped.
/// Returns the number of removed pairs.
pub(crate) fn remove_spike_pairs(graph: &mut TraversalGraph, side: PolygonType) -> usize {
    let mut removed = 0;
    while let Some(v1) = find_spike_pair(graph, side) {
        let v2 = graph[side].next(v1);
        debug!("removing spike intersections at {:?}", graph[side][v1].point);
        graph.remove_pair(side, v1);
        graph.remove_pair(side, v2);
        removed += 1;
    }
    removed
}

/// Returns `v1` of the first matching run `v0, v1, v2, v3`
fn find_spike_pair(graph: &TraversalGraph, side: PolygonType) -> Option<usize> {
    let list = &graph[side];
    if list.len() < 4 {
        return None;
    }
    let other = side.other();

    list.iter().find_map(|v0| {
        let v1 = list.next(v0);
        let v2 = list.next(v1);
        let v3 = list.next(v2);
        let run = [v0, v1, v2, v3];

        let first = &list[v0];
        let uniform = run.iter().all(|&v| {
            list[v].kind.is_intersection() && list[v].kind == first.kind && list[v].point == first.point
        });
        if !uniform {
            return None;
        }

        let twin = |v: usize| list[v].twin;
        let cat = |v: usize| list[v].category;
        let adjacent = |a: usize, b: usize| match (twin(a), twin(b)) {
            (Some(ta), Some(tb)) => graph.are_adjacent(other, ta, tb),
            _ => false,
        };

        let crosswise = cat(v0) == cat(v2) && cat(v1) == cat(v3) && adjacent(v0, v2) && adjacent(v1, v3);
        let nested = cat(v0) == cat(v3) && cat(v1) == cat(v2) && adjacent(v0, v3) && adjacent(v1, v2);
        if crosswise || nested {
            Some(v1)
        } else {
            None
        }
    })
}

/// Drops one of two neighbouring, indistinguishable intersections whose twins
/// are neighbours as well. Returns the number of removed pairs.
pub(crate) fn remove_duplicate_intersections(graph: &mut TraversalGraph, side: PolygonType) -> usize {
    let mut removed = 0;
    while let Some(dup) = find_duplicate(graph, side) {
        debug!("removing duplicate intersection at {:?}", graph[side][dup].point);
        graph.remove_pair(side, dup);
        removed += 1;
    }
    removed
}

fn find_duplicate(graph: &TraversalGraph, side: PolygonType) -> Option<usize> {
    let list = &graph[side];
    if list.len() < 2 {
        return None;
    }

    list.iter().find_map(|a| {
        let b = list.next(a);
        let (va, vb) = (&list[a], &list[b]);
        let same = va.kind.is_intersection()
            && va.kind == vb.kind
            && va.category == vb.category
            && va.point == vb.point;
        if !same {
            return None;
        }
        match (va.twin, vb.twin) {
            (Some(ta), Some(tb)) if graph.are_adjacent(side.other(), ta, tb) => Some(b),
            _ => None,
        }
    })
}

/// An overlap that starts and ends on two neighbouring vertices is passed
/// like a plain crossing, placed on the vertex where the overlap starts
/// from inside or ends towards the inside. Only `category` changes,
/// `original_category` is kept.
pub(crate) fn reclassify_vertex_crossings(graph: &mut TraversalGraph, side: PolygonType) {
    let indices: Vec<usize> = graph[side].iter().collect();
    for v in indices {
        let list = &graph[side];
        if list[v].kind != VertexKind::IntersectionAtVertex {
            continue;
        }
        let (prev, next) = (list.prev(v), list.next(v));
        let at_vertex = |i: usize| i != v && list[i].kind == VertexKind::IntersectionAtVertex;
        let category = list[v].category;

        let at_start = if at_vertex(next) { crossing_at_overlap_start(category, list[next].category) } else { None };
        let replacement = at_start.or_else(|| {
            if at_vertex(prev) { crossing_at_overlap_end(list[prev].category, category) } else { None }
        });

        if let Some(replacement) = replacement {
            debug!("reclassifying {:?} at {:?} as {:?}", category, list[v].point, replacement);
            graph.set_category(side, v, replacement, false);
        }
    }
}

fn crossing_at_overlap_start(this: Category, following: Category) -> Option<Category> {
    use crate::category::Category::*;
    match (this, following) {
        (InsideToAlignedOverlap, AlignedOverlapToOutside)
        | (InsideToReversedOverlap, ReversedOverlapToOutside) => Some(CrossInsideToOutside),
        _ => None,
    }
}

fn crossing_at_overlap_end(preceding: Category, this: Category) -> Option<Category> {
    use crate::category::Category::*;
    match (preceding, this) {
        (OutsideToAlignedOverlap, AlignedOverlapToInside)
        | (OutsideToReversedOverlap, ReversedOverlapToInside) => Some(CrossOutsideToInside),
        _ => None,
    }
}

/// Checks that every twin carries the dual category
#[cfg(test)]
pub(crate) fn is_dual_consistent(graph: &TraversalGraph) -> bool {
    SIDES.iter().all(|&side| {
        let list = &graph[side];
        list.iter().filter(|&i| list[i].kind.is_intersection()).all(|i| {
            match list[i].twin {
                Some(t) => graph[side.other()][t].category == list[i].category.dual()
                    && graph[side.other()][t].twin == Some(i),
                None => false,
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fsize, Point2D, Polygon, ClipConfig};
    use crate::classify::classify_intersections;
    use crate::intersection::find_intersections;
    use crate::traversal::TraversalList;

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

    /// Two lists with `points` intersections on the same spot, where the
    /// subject's k-th intersection is twinned with the clipping's `twins[k]`-th
    fn stacked(points: usize, twins: &[usize], categories: &[Category]) -> TraversalGraph {
        let spot = Point2D::new(1.0, 1.0);
        let mut subject = vec![(Point2D::new(0.0, 0.0), VertexKind::NonIntersection)];
        subject.extend((0..points).map(|_| (spot, VertexKind::Intersection)));
        subject.push((Point2D::new(2.0, 0.0), VertexKind::NonIntersection));

        let mut clipping = vec![(Point2D::new(0.0, 2.0), VertexKind::NonIntersection)];
        clipping.extend((0..points).map(|_| (spot, VertexKind::Intersection)));
        clipping.push((Point2D::new(2.0, 2.0), VertexKind::NonIntersection));

        let mut graph = TraversalGraph::from_lists(TraversalList::from_vertices(subject), TraversalList::from_vertices(clipping));
        for (k, &t) in twins.iter().enumerate() {
            graph[PolygonType::Subject][k + 1].twin = Some(t + 1);
            graph[PolygonType::Clipping][t + 1].twin = Some(k + 1);
            graph.set_category(PolygonType::Subject, k + 1, categories[k], true);
        }
        graph
    }

    #[test]
    fn test_spike_pair_is_removed() {
        use crate::category::Category::*;
        let mut graph = stacked(4, &[0, 2, 1, 3], &[CrossInsideToOutside, CrossOutsideToInside, CrossInsideToOutside, CrossOutsideToInside]);
        assert_eq!(remove_spike_pairs(&mut graph, PolygonType::Subject), 1);
        assert_eq!(graph[PolygonType::Subject].len(), 4);
        assert_eq!(graph[PolygonType::Clipping].len(), 4);
        assert!(is_dual_consistent(&graph));
    }

    #[test]
    fn test_unrelated_run_is_kept() {
        use crate::category::Category::*;
        let mut graph = stacked(4, &[0, 1, 2, 3], &[CrossInsideToOutside, TouchInsideToInside, CrossOutsideToInside, TouchOutsideToOutside]);
        assert_eq!(remove_spike_pairs(&mut graph, PolygonType::Subject), 0);
        assert_eq!(graph.total_len(), 12);
    }

    #[test]
    fn test_duplicate_is_removed() {
        use crate::category::Category::*;
        let mut graph = stacked(2, &[0, 1], &[TouchOutsideToOutside, TouchOutsideToOutside]);
        assert_eq!(remove_duplicate_intersections(&mut graph, PolygonType::Subject), 1);
        assert_eq!(graph[PolygonType::Subject].len(), 3);
        assert_eq!(graph[PolygonType::Clipping].len(), 3);
        assert_eq!(remove_duplicate_intersections(&mut graph, PolygonType::Clipping), 0);
        assert!(is_dual_consistent(&graph));
    }

    #[test]
    fn test_overlap_between_vertices_becomes_crossing() {
        use crate::category::Category::*;
        // the edge (4, 1) -> (4, 3) of b runs up the right edge of a,
        // b reaches it from inside of a and leaves it to the outside
        let a = square(0.0, 0.0, 4.0);
        let b = Polygon::from_coords(&[(2.0, 1.0), (4.0, 1.0), (4.0, 3.0), (6.0, 3.0), (6.0, 6.0), (2.0, 6.0)]);
        let mut graph = classified(&b, &a);

        let list = &graph[PolygonType::Subject];
        let enter = list.iter().find(|&i| list[i].point == Point2D::new(4.0, 1.0)).unwrap();
        let leave = list.next(enter);
        assert_eq!(list[enter].category, InsideToAlignedOverlap);
        assert_eq!(list[leave].category, AlignedOverlapToOutside);

        correct_topology(&mut graph);
        let list = &graph[PolygonType::Subject];
        assert_eq!(list[enter].category, CrossInsideToOutside);
        assert_eq!(list[enter].original_category, InsideToAlignedOverlap);
        assert_eq!(list[leave].category, AlignedOverlapToOutside);
        assert!(is_dual_consistent(&graph));
    }

    #[test]
    fn test_plain_crossings_untouched() {
        let mut graph = classified(&square(0.0, 0.0, 4.0), &square(2.0, 2.0, 4.0));
        let before = graph.clone();
        correct_topology(&mut graph);
        assert_eq!(graph, before);
    }

    #[test]
    fn test_overlap_entered_from_outside_becomes_crossing() {
        use crate::category::Category::*;
        // c comes from outside of a at (4, 1), runs up its right edge and
        // turns inside at (4, 3)
        let a = square(0.0, 0.0, 4.0);
        let c = Polygon::from_coords(&[(4.0, 3.0), (2.0, 3.0), (2.0, -2.0), (6.0, -2.0), (6.0, 1.0), (4.0, 1.0)]);
        let mut graph = classified(&c, &a);

        let list = &graph[PolygonType::Subject];
        let enter = list.iter().find(|&i| list[i].point == Point2D::new(4.0, 1.0)).unwrap();
        let leave = list.next(enter);
        assert_eq!(list[enter].category, OutsideToAlignedOverlap);
        assert_eq!(list[leave].category, AlignedOverlapToInside);

        correct_topology(&mut graph);
        let list = &graph[PolygonType::Subject];
        assert_eq!(list[enter].category, OutsideToAlignedOverlap);
        assert_eq!(list[leave].category, CrossOutsideToInside);
        assert_eq!(list[leave].original_category, AlignedOverlapToInside);
        assert!(is_dual_consistent(&graph));
    }

    #[test]
    fn test_reversed_overlap_entered_from_outside_becomes_crossing() {
        use crate::category::Category::*;
        // as seen by the difference: b against the reversed square
        let a = square(0.0, 0.0, 4.0).reversed();
        let b = Polygon::from_coords(&[(2.0, 1.0), (4.0, 1.0), (4.0, 3.0), (6.0, 3.0), (6.0, 6.0), (2.0, 6.0)]);
        let mut graph = classified(&b, &a);

        let list = &graph[PolygonType::Subject];
        let enter = list.iter().find(|&i| list[i].point == Point2D::new(4.0, 1.0)).unwrap();
        let leave = list.next(enter);
        assert_eq!(list[enter].category, OutsideToReversedOverlap);
        assert_eq!(list[leave].category, ReversedOverlapToInside);

        correct_topology(&mut graph);
        let list = &graph[PolygonType::Subject];
        assert_eq!(list[leave].category, CrossOutsideToInside);
        assert_eq!(list[leave].original_category, ReversedOverlapToInside);
        assert!(is_dual_consistent(&graph));
    }

    #[test]
    fn test_reversed_overlap_left_to_outside_becomes_crossing() {
        use crate::category::Category::*;
        let a = square(0.0, 0.0, 4.0).reversed();
        let c = Polygon::from_coords(&[(4.0, 3.0), (2.0, 3.0), (2.0, -2.0), (6.0, -2.0), (6.0, 1.0), (4.0, 1.0)]);
        let mut graph = classified(&c, &a);

        let list = &graph[PolygonType::Subject];
        let enter = list.iter().find(|&i| list[i].point == Point2D::new(4.0, 1.0)).unwrap();
        assert_eq!(list[enter].category, InsideToReversedOverlap);
        assert_eq!(list[list.next(enter)].category, ReversedOverlapToOutside);

        correct_topology(&mut graph);
        let list = &graph[PolygonType::Subject];
        assert_eq!(list[enter].category, CrossInsideToOutside);
        assert!(is_dual_consistent(&graph));
    }
}
