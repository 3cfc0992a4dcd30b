//! `polyweave` computes boolean operations on two simple polygons A and B:
//!
//! - Intersection (AND): Resulting polygon(s) contained in both A and B
//! - Difference (A_NOT_B): Resulting polygon(s) contain A, except for the Intersection of A and B
//!
//! The inputs may share vertices and (parts of) edges, touch each other in single
//! points, or carry zero-width spikes. Holes are returned as separate, clockwise
//! polygons after their outline.
//!
//! ```rust
//! use polyweave::Polygon;
//!
//! let a = Polygon::from_coords(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
//! let b = Polygon::from_coords(&[(2.0, 2.0), (6.0, 2.0), (6.0, 6.0), (2.0, 6.0)]);
//!
//! // L-shaped remainder of a
//! let rest = a.difference(&b);
//! assert_eq!(rest.len(), 1);
//! assert_eq!(rest[0].len(), 6);
//! ```

#![allow(non_camel_case_types)]

#[cfg(not(feature = "use_double_precision"))]
pub type fsize = f32;
#[cfg(feature = "use_double_precision")]
pub type fsize = f64;

mod algorithm;
mod bbox;
mod category;
mod classify;
mod config;
mod correct;
mod error;
mod intersection;
mod point;
mod polygon;
mod segment;
mod traversal;
mod utils;
mod walker;

pub use algorithm::{difference, difference_with_config, intersection, intersection_with_config};
pub use bbox::Bbox;
pub use config::{ClipConfig, DEFAULT_EPSILON};
pub use point::Point2D;
pub use polygon::{Polygon, WindingOrder};
pub use segment::{Segment, SegmentOverlap};
pub use utils::is_point_left_of_line;
