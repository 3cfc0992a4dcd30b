//! Boolean operations on two simple polygons.
//!
//! Both operations run the same pipeline: find and snap the boundary
//! intersections, merge them into one linked list per polygon, classify
//! every intersection, fix up degenerate spots and finally walk the lists.
//! A difference is the intersection with the reversed cutting polygon.

use log::debug;

use crate::{Polygon, ClipConfig};
use crate::classify::classify_intersections;
use crate::correct::correct_topology;
use crate::intersection::find_intersections;
use crate::traversal::TraversalGraph;
use crate::walker::extract_polygons;

/// Parts of `a` that are also covered by `b`, with the default tolerance
///
/// ```rust
/// use polyweave::{intersection, Polygon};
///
/// let a = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
/// let b = Polygon::from_coords(&[(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)]);
/// let result = intersection(&a, &b);
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].signed_area(), 4.0);
/// ```
pub fn intersection(a: &Polygon, b: &Polygon) -> Vec<Polygon> {
    intersection_with_config(a, b, &ClipConfig::default())
}

/// Parts of `base` that are not covered by `cutting`, with the default tolerance
///
/// A hole is returned as a separate, clockwise polygon after the outline.
pub fn difference(base: &Polygon, cutting: &Polygon) -> Vec<Polygon> {
    difference_with_config(base, cutting, &ClipConfig::default())
}

/// # Panics
///
/// If one of the polygons is oriented clockwise
pub fn intersection_with_config(a: &Polygon, b: &Polygon, config: &ClipConfig) -> Vec<Polygon> {
    let (a, b) = match prepare_input(a, b) {
        Some(input) => input,
        None => return Vec::new(),
    };
    clip(&a, &b, config)
}

/// # Panics
///
/// If one of the polygons is oriented clockwise
pub fn difference_with_config(base: &Polygon, cutting: &Polygon, config: &ClipConfig) -> Vec<Polygon> {
    let (base, cutting) = match prepare_input(base, cutting) {
        Some(input) => input,
        None => return Vec::new(),
    };
    clip(&base, &cutting.reversed(), config)
}

/// Deduplicated copies of both polygons, `None` if one of them is degenerate
fn prepare_input(a: &Polygon, b: &Polygon) -> Option<(Polygon, Polygon)> {
    let a = a.dedup();
    let b = b.dedup();
    if a.len() < 3 || b.len() < 3 {
        debug!("degenerate input polygon ({} and {} points)", a.len(), b.len());
        return None;
    }
    assert!(a.signed_area() >= 0.0, "first polygon must be counter-clockwise");
    assert!(b.signed_area() >= 0.0, "second polygon must be counter-clockwise");
    Some((a, b))
}

/// Region covered by both `subject` and `clipping`. A clockwise `clipping`
/// stands for everything outside of it.
fn clip(subject: &Polygon, clipping: &Polygon, config: &ClipConfig) -> Vec<Polygon> {
    let intersections = find_intersections(subject, clipping, config);
    let mut graph = TraversalGraph::build(subject, clipping, &intersections, config);
    classify_intersections(&mut graph, config);
    correct_topology(&mut graph);
    let result = extract_polygons(&mut graph, subject, clipping, config);
    debug!("{} intersections, {} result polygons", intersections.len(), result.len());
    result
}
