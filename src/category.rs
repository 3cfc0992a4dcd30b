//! Local configuration of the two boundaries at an intersection point.
//!
//! Every category is read from the point of view of the list that holds
//! the vertex. The twin vertex in the other list always carries the dual.

/// How the boundary of one polygon meets the boundary of the other one at an intersection point
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Invalid,

    CrossInsideToOutside,
    CrossOutsideToInside,

    TouchInsideToInside,
    TouchInsideToOutside,
    TouchOutsideToInside,
    TouchOutsideToOutside,

    AlignedOverlapToAlignedOverlap,
    ReversedOverlapToReversedOverlap,

    InsideToAlignedOverlap,
    OutsideToAlignedOverlap,
    AlignedOverlapToInside,
    AlignedOverlapToOutside,

    InsideToReversedOverlap,
    OutsideToReversedOverlap,
    ReversedOverlapToInside,
    ReversedOverlapToOutside,

    AlignedOverlapToReversedOverlapCCW,
    AlignedOverlapToReversedOverlapCW,
    ReversedOverlapToAlignedOverlapCCW,
    ReversedOverlapToAlignedOverlapCW,

    SpikeOverlapToInside,
    SpikeOverlapToOutside,
    InsideToSpikeOverlap,
    OutsideToSpikeOverlap,
}

use self::Category::*;

impl Default for Category {
    fn default() -> Self {
        Invalid
    }
}

impl Category {

    #[cfg(test)]
    pub const ALL: [Category; 25] = [
        Invalid,
        CrossInsideToOutside,
        CrossOutsideToInside,
        TouchInsideToInside,
        TouchInsideToOutside,
        TouchOutsideToInside,
        TouchOutsideToOutside,
        AlignedOverlapToAlignedOverlap,
        ReversedOverlapToReversedOverlap,
        InsideToAlignedOverlap,
        OutsideToAlignedOverlap,
        AlignedOverlapToInside,
        AlignedOverlapToOutside,
        InsideToReversedOverlap,
        OutsideToReversedOverlap,
        ReversedOverlapToInside,
        ReversedOverlapToOutside,
        AlignedOverlapToReversedOverlapCCW,
        AlignedOverlapToReversedOverlapCW,
        ReversedOverlapToAlignedOverlapCCW,
        ReversedOverlapToAlignedOverlapCW,
        SpikeOverlapToInside,
        SpikeOverlapToOutside,
        InsideToSpikeOverlap,
        OutsideToSpikeOverlap,
    ];

    /// The category the same point has when seen from the other polygon.
    /// `dual` is an involution.
    pub fn dual(self) -> Self {
        match self {
            Invalid => Invalid,

            CrossInsideToOutside => CrossOutsideToInside,
            CrossOutsideToInside => CrossInsideToOutside,

            TouchInsideToInside => TouchInsideToInside,
            TouchInsideToOutside => TouchOutsideToInside,
            TouchOutsideToInside => TouchInsideToOutside,
            TouchOutsideToOutside => TouchOutsideToOutside,

            AlignedOverlapToAlignedOverlap => AlignedOverlapToAlignedOverlap,
            ReversedOverlapToReversedOverlap => ReversedOverlapToReversedOverlap,

            InsideToAlignedOverlap => OutsideToAlignedOverlap,
            OutsideToAlignedOverlap => InsideToAlignedOverlap,
            AlignedOverlapToInside => AlignedOverlapToOutside,
            AlignedOverlapToOutside => AlignedOverlapToInside,

            ReversedOverlapToInside => InsideToReversedOverlap,
            InsideToReversedOverlap => ReversedOverlapToInside,
            ReversedOverlapToOutside => OutsideToReversedOverlap,
            OutsideToReversedOverlap => ReversedOverlapToOutside,

            AlignedOverlapToReversedOverlapCW => SpikeOverlapToInside,
            SpikeOverlapToInside => AlignedOverlapToReversedOverlapCW,
            AlignedOverlapToReversedOverlapCCW => SpikeOverlapToOutside,
            SpikeOverlapToOutside => AlignedOverlapToReversedOverlapCCW,
            ReversedOverlapToAlignedOverlapCW => InsideToSpikeOverlap,
            InsideToSpikeOverlap => ReversedOverlapToAlignedOverlapCW,
            ReversedOverlapToAlignedOverlapCCW => OutsideToSpikeOverlap,
            OutsideToSpikeOverlap => ReversedOverlapToAlignedOverlapCCW,
        }
    }

    /// Does the boundary share an edge with the other polygon before or after this point?
    pub fn is_overlap(self) -> bool {
        match self {
            Invalid
            | CrossInsideToOutside
            | CrossOutsideToInside
            | TouchInsideToInside
            | TouchInsideToOutside
            | TouchOutsideToInside
            | TouchOutsideToOutside => false,
            _ => true,
        }
    }

    /// A result polygon may start its walk here
    pub fn is_traversal_start(self) -> bool {
        match self {
            CrossInsideToOutside
            | TouchInsideToInside
            | InsideToAlignedOverlap
            | InsideToReversedOverlap
            | InsideToSpikeOverlap
            | ReversedOverlapToInside => true,
            _ => false,
        }
    }

    /// The walk leaves this list and continues on the twin
    pub fn is_traversal_switch(self) -> bool {
        match self {
            CrossInsideToOutside
            | TouchInsideToInside
            | AlignedOverlapToOutside
            | InsideToReversedOverlap
            | AlignedOverlapToReversedOverlapCW => true,
            _ => false,
        }
    }

    /// Must never be reached in the middle of a walk
    pub fn is_unexpected_in_traversal(self) -> bool {
        match self {
            Invalid
            | CrossOutsideToInside
            | TouchOutsideToInside
            | TouchOutsideToOutside
            | OutsideToAlignedOverlap
            | OutsideToReversedOverlap
            | ReversedOverlapToInside
            | ReversedOverlapToOutside
            | ReversedOverlapToReversedOverlap
            | ReversedOverlapToAlignedOverlapCW
            | ReversedOverlapToAlignedOverlapCCW
            | AlignedOverlapToReversedOverlapCCW
            | SpikeOverlapToOutside
            | OutsideToSpikeOverlap => true,
            _ => false,
        }
    }
}
