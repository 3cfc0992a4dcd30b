use std::ops::{Add, Mul, Neg, Sub};

use crate::fsize;

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Point2D {
    pub x: fsize,
    pub y: fsize,
}

impl Point2D {
    #[inline]
    pub const fn new(x: fsize, y: fsize) -> Self {
        Self { x, y }
    }

    /// z-component of the 3D cross product of (self, 0) and (other, 0)
    #[inline]
    pub fn cross(&self, other: &Point2D) -> fsize {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn dot(&self, other: &Point2D) -> fsize {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length_squared(&self) -> fsize {
        self.dot(self)
    }

    #[inline]
    pub fn length(&self) -> fsize {
        self.length_squared().sqrt()
    }

    /// Linear interpolation, `t = 0` yields `self`, `t = 1` yields `other`
    #[inline]
    pub fn lerp(&self, other: &Point2D, t: fsize) -> Point2D {
        Point2D {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    #[inline]
    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        self.lerp(other, 0.5)
    }
}

impl Add for Point2D {
    type Output = Point2D;

    #[inline]
    fn add(self, rhs: Point2D) -> Point2D {
        Point2D { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    #[inline]
    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<fsize> for Point2D {
    type Output = Point2D;

    #[inline]
    fn mul(self, rhs: fsize) -> Point2D {
        Point2D { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Neg for Point2D {
    type Output = Point2D;

    #[inline]
    fn neg(self) -> Point2D {
        Point2D { x: -self.x, y: -self.y }
    }
}

impl From<(fsize, fsize)> for Point2D {
    #[inline]
    fn from((x, y): (fsize, fsize)) -> Self {
        Point2D { x, y }
    }
}

#[test]
pub fn test_cross_sign() {
    let right = Point2D::new(1.0, 0.0);
    let up = Point2D::new(0.0, 1.0);
    assert!(right.cross(&up) > 0.0);
    assert!(up.cross(&right) < 0.0);
    assert_eq!(right.cross(&right), 0.0);
}

#[test]
pub fn test_lerp_endpoints() {
    let a = Point2D::new(1.0, 2.0);
    let b = Point2D::new(5.0, -2.0);
    assert_eq!(a.lerp(&b, 0.0), a);
    assert_eq!(a.lerp(&b, 1.0), b);
    assert_eq!(a.midpoint(&b), Point2D::new(3.0, 0.0));
}

#[test]
pub fn test_vector_ops() {
    let a = Point2D::new(3.0, 4.0);
    assert_eq!(a.length(), 5.0);
    assert_eq!(a - a, Point2D::default());
    assert_eq!(-a + a * 2.0, a);
    assert_eq!(Point2D::from((3.0, 4.0)), a);
}
