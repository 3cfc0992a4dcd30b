//! Per-polygon working lists: the original vertices merged with the
//! intersection points, doubly linked in a ring and cross-linked to the
//! other polygon's list.
//!
//! The vertices live in an arena (`Vec`) and refer to each other by index,
//! so removing a vertex never invalidates the index of any other vertex.

use std::ops::{Index, IndexMut};

use log::trace;

use crate::{fsize, Point2D, Polygon, ClipConfig};
use crate::category::Category;
use crate::intersection::IndexedIntersection;
use crate::utils::{is_same_direction, spike_fill, walk_distinct, WedgeFill};

/// Indicates if a list belongs to the subject or clipping polygon
#[derive(Debug, PartialEq, Copy, Clone, Eq)]
pub(crate) enum PolygonType {
    Subject,
    Clipping,
}

impl PolygonType {

    #[inline]
    pub(crate) fn other(self) -> Self {
        match self {
            PolygonType::Subject => PolygonType::Clipping,
            PolygonType::Clipping => PolygonType::Subject,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            PolygonType::Subject => 0,
            PolygonType::Clipping => 1,
        }
    }
}

#[derive(Debug, PartialEq, Copy, Clone, Eq)]
pub(crate) enum VertexKind {
    /// Vertex of the input polygon that is not on the other boundary
    NonIntersection,
    /// Boundary intersection in the middle of a segment of this polygon
    Intersection,
    /// Boundary intersection on a vertex of this polygon
    IntersectionAtVertex,
}

impl VertexKind {
    #[inline]
    pub(crate) fn is_intersection(self) -> bool {
        self != VertexKind::NonIntersection
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TraversalVertex {
    pub(crate) point: Point2D,
    pub(crate) kind: VertexKind,
    /// Only meaningful for intersections
    pub(crate) category: Category,
    /// Category as first classified, survives re-classification
    pub(crate) original_category: Category,
    pub(crate) visited: bool,
    /// Index of the same intersection in the other list
    pub(crate) twin: Option<usize>,
    next: usize,
    prev: usize,
    removed: bool,
}

/// Circular, doubly linked list of vertices
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TraversalList {
    vertices: Vec<TraversalVertex>,
    head: Option<usize>,
    len: usize,
}

impl TraversalList {

    pub(crate) fn from_vertices(vertices: Vec<(Point2D, VertexKind)>) -> Self {
        let n = vertices.len();
        let vertices: Vec<_> = vertices.into_iter().enumerate().map(|(i, (point, kind))| TraversalVertex {
            point,
            kind,
            category: Category::Invalid,
            original_category: Category::Invalid,
            visited: false,
            twin: None,
            next: (i + 1) % n,
            prev: (i + n - 1) % n,
            removed: false,
        }).collect();

        Self {
            head: if n == 0 { None } else { Some(0) },
            len: n,
            vertices,
        }
    }

    /// Number of vertices that have not been removed
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn next(&self, index: usize) -> usize {
        self.vertices[index].next
    }

    #[inline]
    pub(crate) fn prev(&self, index: usize) -> usize {
        self.vertices[index].prev
    }

    #[cfg(test)]
    pub(crate) fn is_removed(&self, index: usize) -> bool {
        self.vertices[index].removed
    }

    /// Unlinks a vertex. All other indices stay valid.
    ///
    /// # Panics
    ///
    /// If the vertex was already removed
    pub(crate) fn remove(&mut self, index: usize) {
        assert!(!self.vertices[index].removed, "vertex {} removed twice", index);

        if self.len == 1 {
            self.head = None;
        } else {
            let (prev, next) = (self.vertices[index].prev, self.vertices[index].next);
            self.vertices[prev].next = next;
            self.vertices[next].prev = prev;
            if self.head == Some(index) {
                self.head = Some(next);
            }
        }

        self.vertices[index].removed = true;
        self.len -= 1;
    }

    /// Indices of the live vertices, in list order
    pub(crate) fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        let mut cur = self.head;
        let mut remaining = self.len;
        ::std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let index = cur?;
            remaining -= 1;
            cur = Some(self.vertices[index].next);
            Some(index)
        })
    }

    /// Positions of the live vertices, in list order
    #[cfg(test)]
    pub(crate) fn points(&self) -> Vec<Point2D> {
        self.iter().map(|i| self.vertices[i].point).collect()
    }

    /// Positions walking away from `start`, skipping vertices at the
    /// position that was yielded last. Stops after one round.
    pub(crate) fn walk_distinct(&self, start: usize, forward: bool) -> impl Iterator<Item = Point2D> + '_ {
        let mut last = self.vertices[start].point;
        let mut cur = start;
        let mut remaining = self.len.saturating_sub(1);
        ::std::iter::from_fn(move || {
            while remaining > 0 {
                remaining -= 1;
                cur = if forward { self.vertices[cur].next } else { self.vertices[cur].prev };
                let p = self.vertices[cur].point;
                if p != last {
                    last = p;
                    return Some(p);
                }
            }
            None
        })
    }

    /// Closest preceding position that differs from the position of `index`
    pub(crate) fn distinct_prev(&self, index: usize) -> Point2D {
        self.walk_distinct(index, false).next().unwrap_or(self.vertices[index].point)
    }

    /// Closest following position that differs from the position of `index`
    pub(crate) fn distinct_next(&self, index: usize) -> Point2D {
        self.walk_distinct(index, true).next().unwrap_or(self.vertices[index].point)
    }

    /// Needle or slit, if the boundary doubles back at `index`
    pub(crate) fn spike_fill(&self, index: usize, epsilon: fsize) -> WedgeFill {
        spike_fill(self.walk_distinct(index, false), self.walk_distinct(index, true), self.vertices[index].point, epsilon)
    }
}

impl Index<usize> for TraversalList {
    type Output = TraversalVertex;
    fn index(&self, index: usize) -> &TraversalVertex {
        &self.vertices[index]
    }
}

impl IndexMut<usize> for TraversalList {
    fn index_mut(&mut self, index: usize) -> &mut TraversalVertex {
        &mut self.vertices[index]
    }
}

/// The two cross-linked lists of a boolean operation
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TraversalGraph {
    lists: [TraversalList; 2],
}

impl Index<PolygonType> for TraversalGraph {
    type Output = TraversalList;
    fn index(&self, side: PolygonType) -> &TraversalList {
        &self.lists[side.index()]
    }
}

impl IndexMut<PolygonType> for TraversalGraph {
    fn index_mut(&mut self, side: PolygonType) -> &mut TraversalList {
        &mut self.lists[side.index()]
    }
}

impl TraversalGraph {

    /// Builds the merged lists of `subject` and `clipping` and links the twins
    pub(crate) fn build(subject: &Polygon, clipping: &Polygon, intersections: &[IndexedIntersection], config: &ClipConfig) -> Self {
        let polygons = [subject, clipping];
        let (subject_list, subject_slots) = build_list(polygons, 0, intersections, config);
        let (clipping_list, clipping_slots) = build_list(polygons, 1, intersections, config);

        let mut graph = TraversalGraph::from_lists(subject_list, clipping_list);
        for (&s, &c) in subject_slots.iter().zip(clipping_slots.iter()) {
            graph[PolygonType::Subject][s].twin = Some(c);
            graph[PolygonType::Clipping][c].twin = Some(s);
        }

        trace!("traversal lists with {} and {} vertices", graph[PolygonType::Subject].len(), graph[PolygonType::Clipping].len());
        graph
    }

    /// Pairs two lists without linking any twins
    pub(crate) fn from_lists(subject: TraversalList, clipping: TraversalList) -> Self {
        TraversalGraph { lists: [subject, clipping] }
    }

    /// Number of live vertices in both lists
    pub(crate) fn total_len(&self) -> usize {
        self.lists[0].len() + self.lists[1].len()
    }

    /// Removes a vertex and its twin
    pub(crate) fn remove_pair(&mut self, side: PolygonType, index: usize) {
        let twin = self[side][index].twin;
        self[side].remove(index);
        if let Some(twin) = twin {
            self[side.other()].remove(twin);
        }
    }

    /// Sets the category of a vertex and the dual category of its twin.
    /// With `original`, the original categories are overwritten as well.
    pub(crate) fn set_category(&mut self, side: PolygonType, index: usize, category: Category, original: bool) {
        {
            let v = &mut self[side][index];
            v.category = category;
            if original {
                v.original_category = category;
            }
        }
        if let Some(twin) = self[side][index].twin {
            let t = &mut self[side.other()][twin];
            t.category = category.dual();
            if original {
                t.original_category = category.dual();
            }
        }
    }

    /// Is `b` directly before or after `a` in the list of `side`?
    pub(crate) fn are_adjacent(&self, side: PolygonType, a: usize, b: usize) -> bool {
        let list = &self[side];
        list.next(a) == b || list.prev(a) == b
    }
}

/// Merges the vertices of `polygons[side]` with the intersections on its boundary.
/// Returns the list and, for every intersection, the index of its vertex.
fn build_list(polygons: [&Polygon; 2], side: usize, intersections: &[IndexedIntersection], config: &ClipConfig) -> (TraversalList, Vec<usize>) {
    let polygon = polygons[side];
    let other = 1 - side;

    let mut order: Vec<usize> = (0..intersections.len()).collect();
    order.sort_by(|&a, &b| {
        let (a, b) = (&intersections[a], &intersections[b]);
        a.segments[side].cmp(&b.segments[side])
            .then(a.params[side].total_cmp(&b.params[side]))
            .then(a.segments[other].cmp(&b.segments[other]))
            .then(a.params[other].total_cmp(&b.params[other]))
    });
    break_needle_ties(&mut order, intersections, polygons, side, config);

    let mut vertices: Vec<(Point2D, VertexKind)> = Vec::with_capacity(polygon.len() + order.len());
    let mut slots = vec![0; intersections.len()];
    let mut cursor = 0;

    for seg in 0..polygon.len() {
        let node = polygon.nodes[seg];
        let replaced = order.get(cursor).map_or(false, |&k| {
            intersections[k].segments[side] == seg && intersections[k].params[side] == 0.0
        });
        let repeated = vertices.last().map_or(false, |&(p, kind)| kind.is_intersection() && p == node);
        if !replaced && !repeated {
            vertices.push((node, VertexKind::NonIntersection));
        }

        while let Some(&k) = order.get(cursor) {
            let isect = &intersections[k];
            if isect.segments[side] != seg {
                break;
            }
            let t = isect.params[side];
            let kind = if t == 0.0 || t == 1.0 {
                VertexKind::IntersectionAtVertex
            } else {
                VertexKind::Intersection
            };
            slots[k] = vertices.len();
            vertices.push((isect.point, kind));
            cursor += 1;
        }
    }

    (TraversalList::from_vertices(vertices), slots)
}

/// Orders pairs of intersections at the same location of this polygon
/// that lie on the two sides of a spike of the other polygon.
///
/// The boundary of this polygon passes the spike from one side to the
/// other, so the side it reaches first comes first. A needle and a slit
/// are passed in opposite order.
fn break_needle_ties(order: &mut [usize], intersections: &[IndexedIntersection], polygons: [&Polygon; 2], side: usize, config: &ClipConfig) {
    let mut start = 0;
    while start < order.len() {
        let first = &intersections[order[start]];
        let mut end = start + 1;
        while end < order.len() {
            let cur = &intersections[order[end]];
            if cur.segments[side] != first.segments[side] || cur.params[side] != first.params[side] {
                break;
            }
            end += 1;
        }

        if end - start == 2 {
            let second = &intersections[order[start + 1]];
            if needle_swaps(first, second, polygons, side, config) {
                order.swap(start, start + 1);
            }
        }

        start = end;
    }
}

/// Must `b` come before `a`? Only `true` for the two sides of a spike.
fn needle_swaps(a: &IndexedIntersection, b: &IndexedIntersection, polygons: [&Polygon; 2], side: usize, config: &ClipConfig) -> bool {
    let other = 1 - side;
    let spiked = polygons[other];
    let n = spiked.len();
    let (sa, sb) = (a.segments[other], b.segments[other]);

    // the tip is the vertex shared by the two segments
    let tip = if (sa + 1) % n == sb {
        sb
    } else if (sb + 1) % n == sa {
        sa
    } else {
        return false;
    };

    let da = spiked.segment(sa).direction();
    let db = spiked.segment(sb).direction();
    if !is_same_direction(&da, &(-db), config.epsilon) {
        return false;
    }

    let polygon = polygons[side];
    let seg = a.segments[side];
    let mut dir = polygon.segment(seg).direction();
    if is_same_direction(&dir, &da, config.epsilon) || is_same_direction(&dir, &db, config.epsilon) {
        let anchor = if a.params[side] == 0.0 {
            (seg + polygon.len() - 1) % polygon.len()
        } else {
            (seg + 1) % polygon.len()
        };
        dir = polygon.segment(anchor).direction();
    }

    let (cross_a, cross_b) = (dir.cross(&da), dir.cross(&db));
    let fill = spike_fill(walk_distinct(&spiked.nodes, tip, false), walk_distinct(&spiked.nodes, tip, true), spiked.nodes[tip], config.epsilon);

    match fill {
        WedgeFill::Empty => cross_b < cross_a,
        WedgeFill::Full => cross_b > cross_a,
    }
}
