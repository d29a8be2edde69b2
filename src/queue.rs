//! Batched mutation intents
//!
//! The trimmer never mutates feature↔piece or feature↔coordinate links
//! directly. It queues intents here and the whole batch is applied in one
//! transaction per slice, keeping store round-trips out of the walk.

use serde::{Deserialize, Serialize};

use crate::models::{Annotation, CoordinateId, FeatureId, PieceId};
use crate::store::AnnotationStore;
use crate::utils::errors::SliceError;

/// Intent to move a feature from one piece to another
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceSwap {
    pub feature: FeatureId,
    pub old_piece: PieceId,
    pub new_piece: PieceId,
}

/// Intent to reassign a feature to a new coordinate window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateSwap {
    pub feature: FeatureId,
    pub new_coordinate: CoordinateId,
}

/// Buffer of pending piece and coordinate swaps
///
/// [`flush`](UpdateQueue::flush) is all-or-nothing: every intent is checked
/// against the record graph before any is applied, and a store failure
/// aborts the run rather than leaving a slice half committed.
#[derive(Debug, Default)]
pub struct UpdateQueue {
    piece_swaps: Vec<PieceSwap>,
    coordinate_swaps: Vec<CoordinateSwap>,
}

impl UpdateQueue {
    pub fn new() -> Self {
        UpdateQueue::default()
    }

    pub fn push_piece_swap(&mut self, feature: FeatureId, old_piece: PieceId, new_piece: PieceId) {
        self.piece_swaps.push(PieceSwap {
            feature,
            old_piece,
            new_piece,
        });
    }

    pub fn push_coordinate_swap(&mut self, feature: FeatureId, new_coordinate: CoordinateId) {
        self.coordinate_swaps.push(CoordinateSwap {
            feature,
            new_coordinate,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.piece_swaps.is_empty() && self.coordinate_swaps.is_empty()
    }

    /// Applies all buffered intents to the record graph and the store,
    /// then clears the buffer
    pub fn flush<S: AnnotationStore>(
        &mut self,
        annotation: &mut Annotation,
        store: &mut S,
    ) -> Result<(), SliceError> {
        if self.is_empty() {
            return Ok(());
        }

        // validate before touching anything
        for swap in &self.piece_swaps {
            if annotation.feature(swap.feature).piece != swap.old_piece {
                return Err(SliceError::invariant(format!(
                    "stale piece swap: feature {:?} no longer belongs to piece {:?}",
                    swap.feature, swap.old_piece
                )));
            }
        }

        for swap in &self.coordinate_swaps {
            annotation.swap_coordinate(swap.feature, swap.new_coordinate);
        }
        for swap in &self.piece_swaps {
            annotation.swap_piece(swap.feature, swap.old_piece, swap.new_piece)?;
        }

        store.apply(&self.piece_swaps, &self.coordinate_swaps)?;
        store.commit()?;

        self.piece_swaps.clear();
        self.coordinate_swaps.clear();
        Ok(())
    }
}
