//! Cropping transcripts to slice windows
//!
//! [`TranscriptTrimmer`] walks one transcript's feature chain 5'→3',
//! classifies every step against the target window and queues the
//! resulting coordinate and piece swaps. A feature straddling the window's
//! 3' edge is split in place: the original is truncated at the border and a
//! new feature carries the remainder on a freshly created piece.

use log::debug;

use crate::classify::{classify, Position};
use crate::index::SpatialIndex;
use crate::models::{Annotation, CoordinateId, FeatureId, PieceId, Strand, TranscriptId};
use crate::queue::UpdateQueue;
use crate::store::AnnotationStore;
use crate::utils::errors::SliceError;

/// How a trim run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrimOutcome {
    /// At least one feature fell into or across the window
    Trimmed,
    /// No feature of the transcript touched the window; the caller must
    /// re-verify via [`verify_no_overlap`] before accepting this
    NoOverlap,
}

/// Crops one transcript to what fits into a slice window
///
/// # Examples
///
/// ```rust
/// use genoslice::models::Strand;
/// use genoslice::index::SpatialIndex;
/// use genoslice::queue::UpdateQueue;
/// use genoslice::store::MemoryStore;
/// use genoslice::tests::annotations::standard_annotation;
/// use genoslice::trim::{TranscriptTrimmer, TrimOutcome};
///
/// let (mut ann, tx) = standard_annotation();
/// let mut index = SpatialIndex::build(&ann);
/// let mut queue = UpdateQueue::new();
/// let mut store = MemoryStore::new();
///
/// let window = ann.new_coordinate("chr1", 1000, 2000);
/// let outcome = TranscriptTrimmer::new(&mut ann, &mut index, &mut queue, &mut store, tx)
///     .modify_for_slice(window, Strand::Plus)
///     .unwrap();
/// assert_eq!(outcome, TrimOutcome::Trimmed);
/// ```
pub struct TranscriptTrimmer<'a, S: AnnotationStore> {
    annotation: &'a mut Annotation,
    index: &'a mut SpatialIndex,
    queue: &'a mut UpdateQueue,
    store: &'a mut S,
    transcript: TranscriptId,
}

impl<'a, S: AnnotationStore> TranscriptTrimmer<'a, S> {
    pub fn new(
        annotation: &'a mut Annotation,
        index: &'a mut SpatialIndex,
        queue: &'a mut UpdateQueue,
        store: &'a mut S,
        transcript: TranscriptId,
    ) -> Self {
        TranscriptTrimmer {
            annotation,
            index,
            queue,
            store,
            transcript,
        }
    }

    /// Adjusts the transcript's features and pieces to the new window
    ///
    /// Walks the feature chain in transcription order, one aligned step at a
    /// time. Steps 5' of the window were settled by earlier slices and are
    /// skipped; contained steps queue a coordinate swap; the single border
    /// step is split, its truncated template reassigned to the window;
    /// steps 3' of the border move to the new downstream piece. A second
    /// border step within one walk is a fatal
    /// [`SliceError::InvariantViolation`].
    pub fn modify_for_slice(
        &mut self,
        window: CoordinateId,
        strand: Strand,
    ) -> Result<TrimOutcome, SliceError> {
        debug!(
            "trimming transcript {:?} ({:?}) for window {}",
            self.transcript,
            self.annotation.transcript(self.transcript).given_id,
            self.annotation.coordinate(window)
        );
        let mut seen_one_overlap = false;
        // (piece the split happened in, piece the remainder moved to)
        let mut border: Option<(PieceId, PieceId)> = None;

        for (aligned, piece) in self.transitions_5p_to_3p(strand) {
            let position = {
                let f0 = self.annotation.feature(aligned[0]);
                classify(f0, self.annotation.coordinate(window), strand)?
            };
            match position {
                // settled by an earlier slice or unrelated to this window
                Position::Detached | Position::Upstream | Position::OverlapsUpstream => {}
                Position::Contained => {
                    seen_one_overlap = true;
                    for feature in aligned {
                        self.queue.push_coordinate_swap(feature, window);
                    }
                }
                Position::OverlapsDownstream => {
                    if border.is_some() {
                        return Err(SliceError::invariant(format!(
                            "second border split for transcript {:?} in window {}",
                            self.transcript,
                            self.annotation.coordinate(window)
                        )));
                    }
                    seen_one_overlap = true;
                    // earlier intents must be visible before anything
                    // references the piece created below
                    self.queue.flush(self.annotation, self.store)?;
                    let downstream_piece = self.annotation.new_piece(self.transcript);
                    self.store
                        .create_piece(self.annotation.piece(downstream_piece))?;
                    border = Some((piece, downstream_piece));
                    for feature in aligned {
                        self.split_at_border(feature, window, strand, downstream_piece)?;
                        // the truncated template now ends at the border and
                        // moves into the window with its contained
                        // piece-mates; only the remainder stays outside
                        self.queue.push_coordinate_swap(feature, window);
                    }
                }
                Position::Downstream => {
                    if let Some((piece_at_border, downstream_piece)) = border {
                        if piece == piece_at_border {
                            for feature in aligned {
                                self.queue
                                    .push_piece_swap(feature, piece_at_border, downstream_piece);
                            }
                        }
                    }
                }
            }
        }

        if seen_one_overlap {
            Ok(TrimOutcome::Trimmed)
        } else {
            Ok(TrimOutcome::NoOverlap)
        }
    }

    /// The transcript's feature chain in transcription order, grouped into
    /// aligned steps: features of one piece sharing identical raw
    /// coordinates represent parallel annotation tracks at one position and
    /// are handled as a single step.
    fn transitions_5p_to_3p(&self, strand: Strand) -> Vec<(Vec<FeatureId>, PieceId)> {
        let mut steps: Vec<(Vec<FeatureId>, PieceId)> = Vec::new();
        for &piece_id in &self.annotation.transcript(self.transcript).pieces {
            let mut ordered = self.annotation.piece(piece_id).features.clone();
            ordered.sort_by_key(|&f| {
                let start = self.annotation.feature(f).start;
                if strand.is_plus() {
                    start
                } else {
                    -start
                }
            });
            for feature_id in ordered {
                let feature = self.annotation.feature(feature_id);
                if let Some((group, group_piece)) = steps.last_mut() {
                    let head = self.annotation.feature(group[0]);
                    if *group_piece == piece_id
                        && head.start == feature.start
                        && head.end == feature.end
                    {
                        group.push(feature_id);
                        continue;
                    }
                }
                steps.push((vec![feature_id], piece_id));
            }
        }
        steps
    }

    /// Splits `template` at the window border
    ///
    /// The cut sits at `window.end` on the plus strand and `window.start - 1`
    /// on the minus strand, exclusive-close in transcription direction. The
    /// remainder keeps the template's old coordinate and is indexed
    /// immediately so that later windows of this pass can see it.
    fn split_at_border(
        &mut self,
        template: FeatureId,
        window: CoordinateId,
        strand: Strand,
        downstream_piece: PieceId,
    ) -> Result<(), SliceError> {
        let cut = {
            let w = self.annotation.coordinate(window);
            if strand.is_plus() {
                w.end
            } else {
                w.start - 1
            }
        };
        let downstream = self.annotation.split_feature(template, cut, downstream_piece);
        self.store
            .create_feature(self.annotation.feature(downstream))?;
        self.index.insert(downstream, self.annotation.feature(downstream));
        Ok(())
    }
}

/// Confirms that no feature of the transcript genuinely falls inside the
/// window on the matching strand
///
/// Called when a trim run reports [`TrimOutcome::NoOverlap`]: a gene may
/// overlap a slice while one of its transcripts does not. Returns `false`
/// if any feature does sit inside the window, in which case the missing
/// overlap was a bug and the caller must abort.
pub fn verify_no_overlap(
    annotation: &Annotation,
    transcript: TranscriptId,
    window: CoordinateId,
    strand: Strand,
) -> bool {
    let w = annotation.coordinate(window);
    for feature_id in annotation.transcript_features(transcript) {
        let feature = annotation.feature(feature_id);
        if feature.strand != strand || feature.seqid != w.seqid {
            continue;
        }
        let inside = if strand.is_plus() {
            w.start <= feature.start && feature.start <= w.end
        } else {
            w.start - 1 <= feature.start && feature.start <= w.end - 1
        };
        if inside {
            return false;
        }
    }
    true
}
