//! Finds all points where the boundaries of two polygons meet and
//! cleans them up numerically, so that points which are meant to coincide
//! are bitwise identical.

use log::trace;

use crate::{fsize, Point2D, Polygon, ClipConfig};
use crate::segment::SegmentOverlap;

/// A point shared by two boundaries, located on both of them.
///
/// Index 0 refers to the first polygon, index 1 to the second one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct IndexedIntersection {
    /// Segment index on each polygon
    pub(crate) segments: [usize; 2],
    /// Position along the segment, in [0, 1]
    pub(crate) params: [fsize; 2],
    pub(crate) point: Point2D,
}

/// Upper bound on the snapping passes, each pass only moves points closer together
const MAX_SNAP_PASSES: usize = 8;

/// All pairwise segment intersections, unprocessed
pub(crate) fn find_raw_intersections(p: &Polygon, q: &Polygon, config: &ClipConfig) -> Vec<(usize, usize, SegmentOverlap)> {
    let mut found = Vec::new();

    let q_boxes: Vec<_> = q.segments().map(|s| {
        let bbox = s.bounding_box();
        let margin = config.epsilon * bbox.magnitude().max(1.0);
        bbox.expanded(margin)
    }).collect();

    for (i, ps) in p.segments().enumerate() {
        let p_box = ps.bounding_box();
        for (j, qs) in q.segments().enumerate() {
            if !p_box.overlaps(&q_boxes[j]) {
                continue;
            }
            if let Some(overlap) = ps.intersect(&qs, config) {
                found.push((i, j, overlap));
            }
        }
    }

    found
}

/// Splits overlaps into their two endpoints
fn split_overlaps(raw: Vec<(usize, usize, SegmentOverlap)>) -> Vec<IndexedIntersection> {
    let mut out = Vec::with_capacity(raw.len() * 2);
    for (i, j, overlap) in raw {
        out.push(IndexedIntersection {
            segments: [i, j],
            params: [overlap.self_range.0, overlap.other_range.0],
            point: overlap.start,
        });
        if !overlap.is_point() {
            out.push(IndexedIntersection {
                segments: [i, j],
                params: [overlap.self_range.1, overlap.other_range.1],
                point: overlap.end,
            });
        }
    }
    out
}

/// Finds the intersections of the boundaries of `p` and `q` and snaps them,
/// see [`snap_intersections`]
pub(crate) fn find_intersections(p: &Polygon, q: &Polygon, config: &ClipConfig) -> Vec<IndexedIntersection> {
    let mut intersections = split_overlaps(find_raw_intersections(p, q, config));
    snap_intersections(&mut intersections, [p, q], config);
    let intersections = merge_vertex_duplicates(intersections, [p, q]);
    trace!("found {} boundary intersections", intersections.len());
    intersections
}

/// Makes nearly identical intersections identical:
///
/// - intersections at nearly the same position on the same segment collapse
///   onto the one that comes first along the segment
/// - parameters near 0 or 1 (or points near a segment endpoint) snap onto
///   the exact polygon vertex
///
/// Running it a second time does not change anything.
pub(crate) fn snap_intersections(intersections: &mut [IndexedIntersection], polygons: [&Polygon; 2], config: &ClipConfig) {
    for _ in 0..MAX_SNAP_PASSES {
        let mut changed = false;
        for side in 0..2 {
            changed |= snap_mid_segment(intersections, side, config);
        }
        for side in 0..2 {
            changed |= snap_to_vertices(intersections, polygons[side], side, config);
        }
        if !changed {
            break;
        }
    }
}

/// Moves intersections at the end of a segment to the start of the following one
/// and drops the resulting exact duplicates. A vertex of one polygon lying on the
/// other boundary is otherwise found once per adjacent segment.
pub(crate) fn merge_vertex_duplicates(mut intersections: Vec<IndexedIntersection>, polygons: [&Polygon; 2]) -> Vec<IndexedIntersection> {
    for isect in intersections.iter_mut() {
        for side in 0..2 {
            if isect.params[side] == 1.0 {
                isect.segments[side] = (isect.segments[side] + 1) % polygons[side].len();
                isect.params[side] = 0.0;
            }
        }
    }

    intersections.sort_by(|a, b| {
        a.segments.cmp(&b.segments)
            .then(a.params[0].total_cmp(&b.params[0]))
            .then(a.params[1].total_cmp(&b.params[1]))
    });
    intersections.dedup_by(|a, b| a.segments == b.segments && a.params == b.params);
    intersections
}

fn snap_mid_segment(intersections: &mut [IndexedIntersection], side: usize, config: &ClipConfig) -> bool {
    let mut order: Vec<usize> = (0..intersections.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&intersections[a], &intersections[b]);
        a.segments[side].cmp(&b.segments[side])
            .then(a.params[side].total_cmp(&b.params[side]))
    });

    let mut changed = false;
    for w in order.windows(2) {
        let (prev, cur) = (intersections[w[0]], intersections[w[1]]);
        if prev.segments[side] != cur.segments[side] {
            continue;
        }
        if prev.params[side] == cur.params[side] && prev.point == cur.point {
            continue;
        }
        if config.approx_eq_point(&prev.point, &cur.point) {
            let target = &mut intersections[w[1]];
            target.params[side] = prev.params[side];
            target.point = prev.point;
            changed = true;
        }
    }
    changed
}

fn snap_to_vertices(intersections: &mut [IndexedIntersection], polygon: &Polygon, side: usize, config: &ClipConfig) -> bool {
    let mut changed = false;
    for isect in intersections.iter_mut() {
        let seg = polygon.segment(isect.segments[side]);
        let t = isect.params[side];

        let snapped = if config.approx_eq_param(t, 0.0) || config.approx_eq_point(&isect.point, &seg.begin) {
            Some((0.0, seg.begin))
        } else if config.approx_eq_param(t, 1.0) || config.approx_eq_point(&isect.point, &seg.end) {
            Some((1.0, seg.end))
        } else {
            None
        };

        if let Some((t, point)) = snapped {
            if isect.params[side] != t || isect.point != point {
                isect.params[side] = t;
                isect.point = point;
                changed = true;
            }
        }
    }
    changed
}
