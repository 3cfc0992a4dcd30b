use crate::{fsize, Point2D};

/// Bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct Bbox {
    pub(crate) top: fsize,
    pub(crate) right: fsize,
    pub(crate) bottom: fsize,
    pub(crate) left: fsize,
}

impl Bbox {

    /// Calculates the bounding box of all points in O(n) time
    ///
    /// An empty slice yields an inverted box that overlaps nothing
    pub fn from_points<'a, I: IntoIterator<Item = &'a Point2D>>(points: I) -> Self {
        let mut bbox = Bbox {
            top: fsize::MIN,
            right: fsize::MIN,
            bottom: fsize::MAX,
            left: fsize::MAX,
        };

        for p in points {
            bbox.top = bbox.top.max(p.y);
            bbox.bottom = bbox.bottom.min(p.y);
            bbox.right = bbox.right.max(p.x);
            bbox.left = bbox.left.min(p.x);
        }

        bbox
    }

    /// Grows the box by `margin` on every side
    #[inline]
    pub(crate) fn expanded(&self, margin: fsize) -> Self {
        Bbox {
            top: self.top + margin,
            right: self.right + margin,
            bottom: self.bottom - margin,
            left: self.left - margin,
        }
    }

    /// Returns true if two bounding boxes overlap
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        !((other.left > self.right) ||
          (other.right < self.left) ||
          (other.top < self.bottom) ||
          (other.bottom > self.top))
    }

    /// Largest absolute coordinate inside the box
    #[inline]
    pub(crate) fn magnitude(&self) -> fsize {
        self.top.abs().max(self.bottom.abs()).max(self.left.abs()).max(self.right.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let pts = [Point2D::new(1.0, -2.0), Point2D::new(-3.0, 4.0)];
        let bbox = Bbox::from_points(&pts);
        assert_eq!(bbox, Bbox { top: 4.0, right: 1.0, bottom: -2.0, left: -3.0 });
        assert_eq!(bbox.magnitude(), 4.0);
    }

    #[test]
    fn test_touching_boxes_overlap() {
        let a = Bbox::from_points(&[Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)]);
        let b = Bbox::from_points(&[Point2D::new(1.0, 0.0), Point2D::new(2.0, 1.0)]);
        let c = Bbox::from_points(&[Point2D::new(1.5, 0.0), Point2D::new(2.0, 1.0)]);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.expanded(0.5).overlaps(&c));
    }

    #[test]
    fn test_empty_overlaps_nothing() {
        let empty = Bbox::from_points(&[]);
        let unit = Bbox::from_points(&[Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)]);
        assert!(!empty.overlaps(&unit));
    }
}
