//! The data model of a sliced genome annotation
//!
//! All records live in a single [`Annotation`] arena and refer to each other
//! through typed index ids instead of owning references. This keeps the
//! relational graph mutable during slicing: a [`Feature`] created at a slice
//! border is immediately addressable by its [`FeatureId`], even while its
//! write to the persistent store is still queued.

mod annotation;
mod slices;

pub use annotation::{
    Annotation, Coordinate, CoordinateId, Feature, FeatureId, FeatureKind, PieceId,
    SpatialIndexable, Splittable, Strand, SuperLocus, SuperLocusId, TranscribedPiece, Transcript,
    TranscriptId,
};
pub use slices::{SequenceSlices, SliceSpec};
