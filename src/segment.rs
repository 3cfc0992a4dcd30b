use crate::{fsize, Point2D, Bbox, ClipConfig};

/// Directed segment between two polygon nodes
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment {
    pub begin: Point2D,
    pub end: Point2D,
}

/// Common part of two segments, parameterised along both of them.
///
/// A single touching or crossing point has `start == end` and
/// degenerate ranges. A collinear overlap has `start != end`; the
/// range on the other segment runs backwards if the segments point
/// in opposite directions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SegmentOverlap {
    pub self_range: (fsize, fsize),
    pub other_range: (fsize, fsize),
    pub start: Point2D,
    pub end: Point2D,
}

impl SegmentOverlap {
    #[inline]
    pub fn is_point(&self) -> bool {
        self.start == self.end
    }
}

impl Segment {

    #[inline]
    pub fn new(begin: Point2D, end: Point2D) -> Self {
        Self { begin, end }
    }

    #[inline]
    pub fn direction(&self) -> Point2D {
        self.end - self.begin
    }

    #[inline]
    pub fn point_at(&self, t: fsize) -> Point2D {
        if t == 0.0 {
            self.begin
        } else if t == 1.0 {
            self.end
        } else {
            self.begin.lerp(&self.end, t)
        }
    }

    pub fn bounding_box(&self) -> Bbox {
        Bbox::from_points(&[self.begin, self.end])
    }

    /// Parameter of the orthogonal projection of `p` onto the supporting line
    #[inline]
    pub fn project(&self, p: &Point2D) -> fsize {
        let dir = self.direction();
        (*p - self.begin).dot(&dir) / dir.length_squared()
    }

    /// Distance of `p` from the segment (not the line)
    pub fn distance_to(&self, p: &Point2D) -> fsize {
        let t = self.project(p).max(0.0).min(1.0);
        (*p - self.point_at(t)).length()
    }

    /// Distance of `p` from the supporting line
    #[inline]
    pub fn line_distance(&self, p: &Point2D) -> fsize {
        let dir = self.direction();
        (*p - self.begin).cross(&dir).abs() / dir.length()
    }

    /// Computes the common part of two segments, if any.
    ///
    /// The tolerance is absolute: `config.epsilon` times the largest coordinate
    /// involved. Segments whose endpoints all lie that close to the other
    /// line are collinear, and an endpoint that close to the other segment
    /// is reported as a hit. Zero-length segments never intersect anything.
    pub fn intersect(&self, other: &Segment, config: &ClipConfig) -> Option<SegmentOverlap> {
        let r = self.direction();
        let s = other.direction();
        let r_len = r.length();
        let s_len = s.length();

        if r_len == 0.0 || s_len == 0.0 {
            return None;
        }

        let magnitude = self.bounding_box().magnitude().max(other.bounding_box().magnitude());
        let tolerance = config.epsilon * magnitude.max(1.0);

        let collinear = self.line_distance(&other.begin) <= tolerance
            && self.line_distance(&other.end) <= tolerance
            && other.line_distance(&self.begin) <= tolerance
            && other.line_distance(&self.end) <= tolerance;
        if collinear {
            return self.collinear_overlap(other, tolerance / r_len);
        }

        let denom = r.cross(&s);
        if denom == 0.0 {
            return None;
        }

        let qp = other.begin - self.begin;
        let t = qp.cross(&s) / denom;
        let u = qp.cross(&r) / denom;
        let tc = t.max(0.0).min(1.0);
        let uc = u.max(0.0).min(1.0);
        let point = self.point_at(tc);

        if tc != t || uc != u {
            // near miss: accept if the closest points are within the tolerance
            if other.distance_to(&point) > tolerance || self.distance_to(&other.point_at(uc)) > tolerance {
                return None;
            }
        }

        Some(SegmentOverlap {
            self_range: (tc, tc),
            other_range: (uc, uc),
            start: point,
            end: point,
        })
    }

    /// Common part of two collinear segments. `tolerance` is in units of
    /// the parameter along `self`.
    fn collinear_overlap(&self, other: &Segment, tolerance: fsize) -> Option<SegmentOverlap> {
        let t0 = self.project(&other.begin);
        let t1 = self.project(&other.end);
        let (lo_other, hi_other) = if t0 <= t1 { ((t0, 0.0), (t1, 1.0)) } else { ((t1, 1.0), (t0, 0.0)) };

        if lo_other.0 > 1.0 + tolerance || hi_other.0 < -tolerance {
            return None;
        }

        // endpoints of the common part are always vertices of one of the two segments
        let resolve = |(t_other, u_other): (fsize, fsize), clamp_to: fsize, inside: bool| -> (fsize, fsize, Point2D) {
            if inside {
                (t_other.max(0.0).min(1.0), u_other, other.point_at(u_other))
            } else {
                let p = self.point_at(clamp_to);
                (clamp_to, other.project(&p).max(0.0).min(1.0), p)
            }
        };

        let (t_lo, u_lo, start) = resolve(lo_other, 0.0, lo_other.0 >= 0.0);
        let (t_hi, u_hi, end) = resolve(hi_other, 1.0, hi_other.0 <= 1.0);

        if t_hi - t_lo <= tolerance || start == end {
            return Some(SegmentOverlap {
                self_range: (t_lo, t_lo),
                other_range: (u_lo, u_lo),
                start,
                end: start,
            });
        }

        Some(SegmentOverlap {
            self_range: (t_lo, t_hi),
            other_range: (u_lo, u_hi),
            start,
            end,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(x0: fsize, y0: fsize, x1: fsize, y1: fsize) -> Segment {
        Segment::new(Point2D::new(x0, y0), Point2D::new(x1, y1))
    }

    #[test]
    fn test_crossing() {
        let cfg = ClipConfig::default();
        let hit = seg(0.0, 0.0, 4.0, 0.0).intersect(&seg(1.0, -1.0, 1.0, 3.0), &cfg).unwrap();
        assert!(hit.is_point());
        assert_eq!(hit.start, Point2D::new(1.0, 0.0));
        assert_eq!(hit.self_range, (0.25, 0.25));
        assert_eq!(hit.other_range, (0.25, 0.25));
    }

    #[test]
    fn test_no_intersection() {
        let cfg = ClipConfig::default();
        assert!(seg(0.0, 0.0, 4.0, 0.0).intersect(&seg(5.0, -1.0, 5.0, 3.0), &cfg).is_none());
        // parallel, not collinear
        assert!(seg(0.0, 0.0, 4.0, 0.0).intersect(&seg(0.0, 1.0, 4.0, 1.0), &cfg).is_none());
        // collinear, disjoint
        assert!(seg(0.0, 0.0, 4.0, 0.0).intersect(&seg(5.0, 0.0, 7.0, 0.0), &cfg).is_none());
    }

    #[test]
    fn test_touching_endpoints() {
        let cfg = ClipConfig::default();
        let hit = seg(0.0, 0.0, 4.0, 0.0).intersect(&seg(4.0, 0.0, 4.0, 4.0), &cfg).unwrap();
        assert!(hit.is_point());
        assert_eq!(hit.self_range, (1.0, 1.0));
        assert_eq!(hit.other_range, (0.0, 0.0));
        assert_eq!(hit.start, Point2D::new(4.0, 0.0));
    }

    #[test]
    fn test_collinear_touching_endpoints() {
        let cfg = ClipConfig::default();
        let hit = seg(0.0, 0.0, 4.0, 0.0).intersect(&seg(4.0, 0.0, 6.0, 0.0), &cfg).unwrap();
        assert!(hit.is_point());
        assert_eq!(hit.start, Point2D::new(4.0, 0.0));
        assert_eq!(hit.self_range, (1.0, 1.0));
        assert_eq!(hit.other_range, (0.0, 0.0));
    }

    #[test]
    fn test_aligned_overlap() {
        let cfg = ClipConfig::default();
        let hit = seg(0.0, 0.0, 4.0, 0.0).intersect(&seg(2.0, 0.0, 6.0, 0.0), &cfg).unwrap();
        assert!(!hit.is_point());
        assert_eq!(hit.start, Point2D::new(2.0, 0.0));
        assert_eq!(hit.end, Point2D::new(4.0, 0.0));
        assert_eq!(hit.self_range, (0.5, 1.0));
        assert_eq!(hit.other_range, (0.0, 0.5));
    }

    #[test]
    fn test_reversed_overlap() {
        let cfg = ClipConfig::default();
        let hit = seg(0.0, 0.0, 4.0, 0.0).intersect(&seg(3.0, 0.0, 1.0, 0.0), &cfg).unwrap();
        assert_eq!(hit.start, Point2D::new(1.0, 0.0));
        assert_eq!(hit.end, Point2D::new(3.0, 0.0));
        assert_eq!(hit.self_range, (0.25, 0.75));
        assert_eq!(hit.other_range, (1.0, 0.0));
    }

    #[test]
    fn test_distance_and_bounds() {
        let s = seg(0.0, 0.0, 4.0, 0.0);
        assert_eq!(s.distance_to(&Point2D::new(2.0, 3.0)), 3.0);
        assert_eq!(s.distance_to(&Point2D::new(7.0, 4.0)), 5.0);
        assert_eq!(s.line_distance(&Point2D::new(7.0, -4.0)), 4.0);
        assert_eq!(s.point_at(0.25), Point2D::new(1.0, 0.0));
    }

    #[test]
    fn test_collinear_far_from_origin() {
        let cfg = ClipConfig::default();
        // both lie on y = 1000 up to rounding of the coordinates
        let a = seg(1000.0, 1000.0, 1002.0, 1000.0);
        let b = seg(1001.0, 1000.0 + 1.0e-13, 1003.0, 1000.0);
        let hit = a.intersect(&b, &cfg).unwrap();
        assert!(!hit.is_point());
        assert_eq!(hit.start, b.begin);
        assert_eq!(hit.end, a.end);
        assert_eq!(hit.self_range.1, 1.0);
    }

    #[test]
    fn test_vertex_near_edge_far_from_origin() {
        let cfg = ClipConfig::default();
        // the start of b sits on a, off by a rounding error
        let a = seg(1000.0, 1000.0, 1002.0, 1000.0);
        let b = seg(1001.0, 1000.0 + 1.0e-13, 1001.0, 1003.0);
        let hit = a.intersect(&b, &cfg).unwrap();
        assert!(hit.is_point());
        assert_eq!(hit.other_range, (0.0, 0.0));
        assert!((hit.self_range.0 - 0.5).abs() < 1.0e-12);

        // a real gap is still a miss
        let c = seg(1001.0, 1000.001, 1001.0, 1003.0);
        assert!(a.intersect(&c, &cfg).is_none());
    }
}
