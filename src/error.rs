//! Errors raised while walking the traversal lists.
//!
//! They never leave the crate: a failed traversal is logged and dropped,
//! the public operations only ever return a (possibly empty) list of polygons.

use thiserror::Error;

use crate::category::Category;
use crate::fsize;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipError {
    /// The walk reached a vertex whose category can only be the
    /// start of a traversal, the lists are inconsistent.
    #[error("unexpected intersection category {category:?} at ({x}, {y})")]
    UnexpectedCategory {
        category: Category,
        x: fsize,
        y: fsize,
    },

    /// More points than both lists hold together, the twin links form a cycle
    /// that never returns to the start vertex.
    #[error("traversal did not close after {limit} points")]
    IterationLimit {
        limit: usize,
    },

    #[error("traversal closed with only {points} distinct points")]
    DegenerateTraversal {
        points: usize,
    },
}

pub type ClipResult<T> = Result<T, ClipError>;
