//! Driving a full slicing run over an annotation
//!
//! The controller processes the externally supplied slice windows strictly
//! in order, one strand-directed pass at a time: forward over the windows
//! for the plus strand, then in reverse for the minus strand, since feature
//! coordinates are interpreted strand-relatively and the walk direction has
//! to match. All mutations of one window are committed before the next
//! window is touched.

use std::collections::BTreeSet;

use log::debug;

use crate::index::SpatialIndex;
use crate::models::{Annotation, CoordinateId, SliceSpec, Strand, SuperLocusId, TranscriptId};
use crate::queue::UpdateQueue;
use crate::store::AnnotationStore;
use crate::trim::{verify_no_overlap, TranscriptTrimmer, TrimOutcome};
use crate::utils::errors::SliceError;

/// Partitions a genome annotation to match a set of sequence slices
///
/// # Examples
///
/// ```rust
/// use genoslice::models::SliceSpec;
/// use genoslice::slicer::SliceController;
/// use genoslice::store::MemoryStore;
/// use genoslice::tests::annotations::standard_annotation;
///
/// let (ann, tx) = standard_annotation();
/// let mut controller = SliceController::new(ann, MemoryStore::new());
/// let slices = vec![
///     SliceSpec { seqid: "chr1".into(), start: 0, end: 1000, slice_id: "chr1-0".into() },
///     SliceSpec { seqid: "chr1".into(), start: 1000, end: 2000, slice_id: "chr1-1".into() },
///     SliceSpec { seqid: "chr1".into(), start: 2000, end: 3000, slice_id: "chr1-2".into() },
/// ];
/// controller.slice_annotations(&slices).unwrap();
///
/// // the transcript crossed two borders and now owns three pieces
/// assert_eq!(controller.annotation().transcript(tx).pieces.len(), 3);
/// ```
pub struct SliceController<S: AnnotationStore> {
    annotation: Annotation,
    index: SpatialIndex,
    queue: UpdateQueue,
    store: S,
}

impl<S: AnnotationStore> SliceController<S> {
    /// Opens a controller over a loaded annotation and a store handle,
    /// building the spatial index up front
    pub fn new(annotation: Annotation, store: S) -> Self {
        let index = SpatialIndex::build(&annotation);
        SliceController {
            annotation,
            index,
            queue: UpdateQueue::new(),
            store,
        }
    }

    /// Artificially slices the annotation to match the sequence slices,
    /// adjusting transcripts as appropriate
    pub fn slice_annotations(&mut self, slices: &[SliceSpec]) -> Result<(), SliceError> {
        self.slice_annotations_one_way(slices.iter(), Strand::Plus)?;
        self.slice_annotations_one_way(slices.iter().rev(), Strand::Minus)
    }

    fn slice_annotations_one_way<'a, I>(
        &mut self,
        slices: I,
        strand: Strand,
    ) -> Result<(), SliceError>
    where
        I: Iterator<Item = &'a SliceSpec>,
    {
        for slice in slices {
            debug!(
                "slicing {} {}:{}-{} ({})",
                slice.slice_id, slice.seqid, slice.start, slice.end, strand
            );
            let window = self
                .annotation
                .new_coordinate(&slice.seqid, slice.start, slice.end);
            self.store
                .create_coordinate(self.annotation.coordinate(window))?;

            for locus in self.overlapping_super_loci(&slice.seqid, slice.start, slice.end, strand)
            {
                let transcripts = self.annotation.super_locus(locus).transcripts.clone();
                for transcript in transcripts {
                    self.trim_transcript(transcript, window, strand)?;
                }
            }
            self.queue.flush(&mut self.annotation, &mut self.store)?;
        }
        Ok(())
    }

    fn trim_transcript(
        &mut self,
        transcript: TranscriptId,
        window: CoordinateId,
        strand: Strand,
    ) -> Result<(), SliceError> {
        let outcome = TranscriptTrimmer::new(
            &mut self.annotation,
            &mut self.index,
            &mut self.queue,
            &mut self.store,
            transcript,
        )
        .modify_for_slice(window, strand)?;

        match outcome {
            TrimOutcome::Trimmed => Ok(()),
            // the gene overlaps the window but this transcript may not;
            // acceptable only if the re-check confirms it
            TrimOutcome::NoOverlap => {
                if verify_no_overlap(&self.annotation, transcript, window, strand) {
                    Ok(())
                } else {
                    Err(SliceError::invariant(format!(
                        "transcript {:?} reported no overlap with window {} but has features inside it",
                        transcript,
                        self.annotation.coordinate(window)
                    )))
                }
            }
        }
    }

    /// Super loci with at least one feature anchored in `[start, end)` on
    /// `strand`, in deterministic order
    fn overlapping_super_loci(
        &self,
        seqid: &str,
        start: i64,
        end: i64,
        strand: Strand,
    ) -> Vec<SuperLocusId> {
        let mut loci = BTreeSet::new();
        for feature_id in self
            .index
            .features_in(&self.annotation, seqid, start, end, strand)
        {
            let feature = self.annotation.feature(feature_id);
            let transcript = self.annotation.piece(feature.piece).transcript;
            loci.insert(self.annotation.transcript(transcript).super_locus);
        }
        loci.into_iter().collect()
    }

    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Closes the controller, handing back the sliced annotation and the
    /// store handle
    pub fn into_parts(self) -> (Annotation, S) {
        (self.annotation, self.store)
    }
}
