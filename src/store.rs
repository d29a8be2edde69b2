//! The persistent annotation store seam
//!
//! Slicing mutates a live record graph whose authoritative copy lives in an
//! external store. The store handle is threaded explicitly through the
//! controller and the queue; its lifecycle is "open before the first slice,
//! commit after the last flush".

use crate::models::{Coordinate, Feature, TranscribedPiece};
use crate::queue::{CoordinateSwap, PieceSwap};
use crate::utils::errors::StoreError;

/// Write interface of a persistent annotation store
///
/// Record creations are persisted as they happen; link mutations arrive as
/// one batch per slice via [`apply`](AnnotationStore::apply) followed by
/// [`commit`](AnnotationStore::commit). Implementations must treat a batch
/// as a single transaction.
pub trait AnnotationStore {
    fn create_coordinate(&mut self, coordinate: &Coordinate) -> Result<(), StoreError>;

    fn create_piece(&mut self, piece: &TranscribedPiece) -> Result<(), StoreError>;

    fn create_feature(&mut self, feature: &Feature) -> Result<(), StoreError>;

    /// Applies one batch of piece and coordinate swaps
    fn apply(
        &mut self,
        piece_swaps: &[PieceSwap],
        coordinate_swaps: &[CoordinateSwap],
    ) -> Result<(), StoreError>;

    fn commit(&mut self) -> Result<(), StoreError>;
}

/// In-memory store that records what it was asked to persist
///
/// Serves as the store backend for tests and for runs where the arena itself
/// is the only copy of the annotation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub created_coordinates: Vec<Coordinate>,
    pub created_pieces: Vec<TranscribedPiece>,
    pub created_features: Vec<Feature>,
    pub applied_piece_swaps: usize,
    pub applied_coordinate_swaps: usize,
    pub commits: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl AnnotationStore for MemoryStore {
    fn create_coordinate(&mut self, coordinate: &Coordinate) -> Result<(), StoreError> {
        self.created_coordinates.push(coordinate.clone());
        Ok(())
    }

    fn create_piece(&mut self, piece: &TranscribedPiece) -> Result<(), StoreError> {
        self.created_pieces.push(piece.clone());
        Ok(())
    }

    fn create_feature(&mut self, feature: &Feature) -> Result<(), StoreError> {
        self.created_features.push(feature.clone());
        Ok(())
    }

    fn apply(
        &mut self,
        piece_swaps: &[PieceSwap],
        coordinate_swaps: &[CoordinateSwap],
    ) -> Result<(), StoreError> {
        self.applied_piece_swaps += piece_swaps.len();
        self.applied_coordinate_swaps += coordinate_swaps.len();
        Ok(())
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.commits += 1;
        Ok(())
    }
}
