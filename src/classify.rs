//! Strand-relative position classification of features against a slice window
//!
//! All reasoning happens in transcription order: on the minus strand a
//! feature's effective start/end are its swapped physical coordinates, so
//! "upstream" and "downstream" always mean 5' and 3' of the walk, never left
//! and right on the sequence.

use crate::models::{Coordinate, Feature, Strand};
use crate::utils::errors::SliceError;

/// The position of one feature relative to one slice window
///
/// The six categories partition all cases; classification returning none of
/// them is a fatal invariant violation, not a silent fall-through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// Different seqid or strand; unrelated to this window
    Detached,
    /// Entirely 5' of the window, resolved by an earlier slice
    Upstream,
    /// Straddles the window's 5' edge, resolved by an earlier pass
    OverlapsUpstream,
    /// Entirely inside `[start, end)`; reassign to the window
    Contained,
    /// Straddles the window's 3' edge; split here
    OverlapsDownstream,
    /// Entirely 3' of the window
    Downstream,
}

/// Positions one feature relative to one slice window on one strand
///
/// # Examples
///
/// ```rust
/// use genoslice::classify::{PositionInterp, Position};
/// use genoslice::models::{Annotation, FeatureKind, Strand};
///
/// let mut ann = Annotation::new();
/// let coord = ann.new_coordinate("chr1", 0, 10_000);
/// let locus = ann.new_super_locus(None);
/// let tx = ann.new_transcript(locus, None);
/// let piece = ann.new_piece(tx);
/// let f = ann.new_feature(
///     piece,
///     FeatureKind::TranscriptionStart,
///     "chr1",
///     500,
///     2500,
///     Strand::Plus,
///     coord,
///     None,
/// );
///
/// let window = ann.new_coordinate("chr1", 1000, 2000);
/// let interp = PositionInterp::new(ann.feature(f), ann.coordinate(window), Strand::Plus);
/// assert_eq!(interp.position().unwrap(), Position::OverlapsDownstream);
/// ```
pub struct PositionInterp<'a> {
    feature: &'a Feature,
    window: &'a Coordinate,
    strand: Strand,
    eff_start: i64,
    eff_end: i64,
}

impl<'a> PositionInterp<'a> {
    pub fn new(feature: &'a Feature, window: &'a Coordinate, strand: Strand) -> Self {
        // +1 turns the minus-strand coordinates into an inclusive/exclusive
        // pair when read in the plus direction
        let (eff_start, eff_end) = if strand.is_plus() {
            (feature.start, feature.end)
        } else {
            (feature.end + 1, feature.start + 1)
        };
        PositionInterp {
            feature,
            window,
            strand,
            eff_start,
            eff_end,
        }
    }

    fn is_detached(&self) -> bool {
        self.window.seqid != self.feature.seqid || self.strand != self.feature.strand
    }

    fn is_lower(&self) -> bool {
        self.window.start - self.eff_end >= 0
    }

    fn is_higher(&self) -> bool {
        self.eff_start - self.window.end >= 0
    }

    fn is_upstream(&self) -> bool {
        if self.strand.is_plus() {
            self.is_lower()
        } else {
            self.is_higher()
        }
    }

    fn is_downstream(&self) -> bool {
        if self.strand.is_plus() {
            self.is_higher()
        } else {
            self.is_lower()
        }
    }

    fn is_contained(&self) -> bool {
        let start_contained =
            self.window.start <= self.eff_start && self.eff_start < self.window.end;
        let end_contained = self.window.start < self.eff_end && self.eff_end <= self.window.end;
        start_contained && end_contained
    }

    fn overlaps_lower(&self) -> bool {
        self.eff_start < self.window.start && self.window.start < self.eff_end
    }

    fn overlaps_higher(&self) -> bool {
        self.eff_start < self.window.end && self.window.end < self.eff_end
    }

    fn overlaps_upstream(&self) -> bool {
        if self.strand.is_plus() {
            self.overlaps_lower()
        } else {
            self.overlaps_higher()
        }
    }

    fn overlaps_downstream(&self) -> bool {
        if self.strand.is_plus() {
            self.overlaps_higher()
        } else {
            self.overlaps_lower()
        }
    }

    /// The category the feature falls into
    ///
    /// A feature straddling both window edges counts as
    /// [`Position::OverlapsDownstream`]: the 3' cut must still happen, while
    /// its 5' half remains the business of earlier slices. The downstream
    /// check therefore runs before the upstream-overlap check.
    pub fn position(&self) -> Result<Position, SliceError> {
        if self.is_detached() {
            Ok(Position::Detached)
        } else if self.is_upstream() {
            Ok(Position::Upstream)
        } else if self.is_contained() {
            Ok(Position::Contained)
        } else if self.overlaps_downstream() {
            Ok(Position::OverlapsDownstream)
        } else if self.overlaps_upstream() {
            Ok(Position::OverlapsUpstream)
        } else if self.is_downstream() {
            Ok(Position::Downstream)
        } else {
            Err(SliceError::invariant(format!(
                "feature {} matches no position category against window {} ({})",
                self.feature, self.window, self.strand
            )))
        }
    }
}

/// Classifies one feature against one slice window
pub fn classify(
    feature: &Feature,
    window: &Coordinate,
    strand: Strand,
) -> Result<Position, SliceError> {
    PositionInterp::new(feature, window, strand).position()
}
