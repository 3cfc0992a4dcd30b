//! Extracts the result polygons from the classified lists.

use log::{debug, trace};

use crate::{Point2D, Polygon, ClipConfig};
use crate::category::Category;
use crate::error::{ClipError, ClipResult};
use crate::traversal::{PolygonType, TraversalGraph, VertexKind};
use crate::utils::is_same_direction;

const SIDES: [PolygonType; 2] = [PolygonType::Subject, PolygonType::Clipping];

/// Walks all traversals, or decides by containment if there is nothing to walk.
///
/// `subject` and `clipping` are the polygons `graph` was built from.
pub(crate) fn extract_polygons(graph: &mut TraversalGraph, subject: &Polygon, clipping: &Polygon, config: &ClipConfig) -> Vec<Polygon> {
    if !has_traversal_start(graph) {
        return containment_fallback(graph, subject, clipping, config);
    }

    let mut result = Vec::new();
    for &side in SIDES.iter() {
        while let Some(start) = next_start(graph, side) {
            match traverse(graph, side, start, config) {
                Ok(polygon) => {
                    trace!("traversal from {:?} closed with {} points", graph[side][start].point, polygon.len());
                    result.push(polygon);
                },
                Err(e) => debug!("discarding traversal: {}", e),
            }
        }
    }
    result
}

fn has_traversal_start(graph: &TraversalGraph) -> bool {
    SIDES.iter().any(|&side| {
        let list = &graph[side];
        list.iter().any(|i| list[i].kind.is_intersection() && list[i].category.is_traversal_start())
    })
}

fn next_start(graph: &TraversalGraph, side: PolygonType) -> Option<usize> {
    let list = &graph[side];
    list.iter().find(|&i| {
        let v = &list[i];
        !v.visited && v.kind.is_intersection() && v.category.is_traversal_start()
    })
}

/// Walks one result polygon, beginning at the intersection `start` of the list `side`
pub(crate) fn traverse(graph: &mut TraversalGraph, side: PolygonType, start: usize, config: &ClipConfig) -> ClipResult<Polygon> {
    let limit = graph.total_len();
    let mut points: Vec<Point2D> = Vec::new();
    let (mut cur_side, mut cur) = (side, start);
    let mut first = true;
    let mut steps = 0;

    loop {
        let (point, kind, category, twin) = {
            let v = &graph[cur_side][cur];
            (v.point, v.kind, v.category, v.twin)
        };

        if !first {
            let back_at_start = cur_side == side && cur == start;
            let twin_is_start = cur_side != side && category.is_overlap() && twin == Some(start);
            if back_at_start || twin_is_start {
                break;
            }
        }

        graph[cur_side][cur].visited = true;
        if category.is_overlap() {
            if let Some(t) = twin {
                graph[cur_side.other()][t].visited = true;
            }
        }

        let is_intersection = kind.is_intersection();
        if is_intersection && !first && category.is_unexpected_in_traversal() {
            return Err(ClipError::UnexpectedCategory { category, x: point.x, y: point.y });
        }

        match twin {
            Some(t) if is_intersection && category.is_traversal_switch() => {
                if !is_redundant_switch(graph, cur_side, cur, config) {
                    points.push(point);
                }
                cur_side = cur_side.other();
                cur = t;
            },
            _ => {
                let emit = kind != VertexKind::Intersection
                    || (first && category == Category::ReversedOverlapToInside);
                if emit {
                    points.push(point);
                }
            },
        }

        cur = graph[cur_side].next(cur);
        first = false;
        steps += 1;

        if points.len() > limit || steps > 2 * limit {
            return Err(ClipError::IterationLimit { limit });
        }
    }

    finalize(points)
}

/// A switch in the middle of two collinear segments adds no corner
fn is_redundant_switch(graph: &TraversalGraph, side: PolygonType, index: usize, config: &ClipConfig) -> bool {
    let v = &graph[side][index];
    let twin = match v.twin {
        Some(t) => t,
        None => return false,
    };
    let other = &graph[side.other()][twin];
    if v.kind != VertexKind::Intersection || other.kind != VertexKind::Intersection || !v.original_category.is_overlap() {
        return false;
    }

    let incoming = v.point - graph[side].distinct_prev(index);
    let outgoing = graph[side.other()].distinct_next(twin) - v.point;
    is_same_direction(&incoming, &outgoing, config.epsilon)
}

fn finalize(mut points: Vec<Point2D>) -> ClipResult<Polygon> {
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return Err(ClipError::DegenerateTraversal { points: points.len() });
    }
    Ok(Polygon::new(points))
}

/// Is `p` inside the region bounded by `polygon`? A clockwise polygon bounds
/// everything outside of it.
fn is_in_region(p: &Point2D, polygon: &Polygon) -> bool {
    if polygon.signed_area() >= 0.0 {
        polygon.winding_number(p) != 0
    } else {
        polygon.winding_number(p) == 0
    }
}

/// A point on the boundary of list `side` that is not on the boundary of `other`
fn test_point(graph: &TraversalGraph, side: PolygonType, other: &Polygon, config: &ClipConfig) -> Option<Point2D> {
    let list = &graph[side];

    let vertex = list.iter()
        .filter(|&i| list[i].kind == VertexKind::NonIntersection)
        .map(|i| list[i].point)
        .find(|p| !other.on_boundary(p, config));

    vertex.or_else(|| {
        list.iter()
            .map(|i| list[i].point.midpoint(&list[list.next(i)].point))
            .find(|p| !other.on_boundary(p, config))
    })
}

/// Result for boundaries that do not cross: one polygon inside the other,
/// disjoint, or identical
fn containment_fallback(graph: &TraversalGraph, subject: &Polygon, clipping: &Polygon, config: &ClipConfig) -> Vec<Polygon> {
    let subject_point = test_point(graph, PolygonType::Subject, clipping, config);
    let clipping_point = test_point(graph, PolygonType::Clipping, subject, config);

    if subject_point.is_none() && clipping_point.is_none() {
        debug!("boundaries coincide");
        return if clipping.signed_area() >= 0.0 {
            vec![subject.clone()]
        } else {
            Vec::new()
        };
    }

    let mut result = Vec::new();
    if subject_point.map_or(false, |p| is_in_region(&p, clipping)) {
        result.push(subject.clone());
    }
    if clipping_point.map_or(false, |p| is_in_region(&p, subject)) {
        result.push(clipping.clone());
    }
    debug!("no crossing boundaries, {} polygons by containment", result.len());
    result
}
