//! Per-sequence interval index over annotation features
//!
//! The index answers "which features start inside `[start, end)` on a given
//! strand" without scanning the whole annotation. It is built once before
//! slicing begins; features synthesized at a slice border are inserted right
//! away so that later windows of the same pass can see them, even while
//! their persistent-store write is still queued.

use std::collections::HashMap;

use bio::data_structures::interval_tree::IntervalTree;
use log::warn;

use crate::models::{Annotation, FeatureId, SpatialIndexable, Strand};

/// Interval index over all features of an [`Annotation`], keyed by seqid
///
/// Each feature is registered as the point interval
/// `[index_point, index_point + 1)`, mirroring how the annotation store
/// anchors a feature at its 5' position.
///
/// # Examples
///
/// ```rust
/// use genoslice::index::SpatialIndex;
/// use genoslice::models::Strand;
/// use genoslice::tests::annotations::standard_annotation;
///
/// let (ann, _) = standard_annotation();
/// let index = SpatialIndex::build(&ann);
/// let hits = index.features_in(&ann, "chr1", 0, 1000, Strand::Plus);
/// assert_eq!(hits.len(), 1);
/// ```
pub struct SpatialIndex {
    trees: HashMap<String, IntervalTree<i64, FeatureId>>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        SpatialIndex::new()
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        SpatialIndex {
            trees: HashMap::new(),
        }
    }

    /// Builds the index over every feature currently in the annotation
    pub fn build(annotation: &Annotation) -> Self {
        let mut index = SpatialIndex::new();
        for feature in annotation.features() {
            index.insert(feature.id, feature);
        }
        index
    }

    /// Registers one entity under its index point
    pub fn insert<T: SpatialIndexable>(&mut self, id: FeatureId, entity: &T) {
        let point = entity.index_point();
        self.trees
            .entry(entity.seqid().to_string())
            .or_insert_with(IntervalTree::new)
            .insert(point..point + 1, id);
    }

    /// Features whose index point lies in `[start, end)` on `strand`
    ///
    /// A seqid without any indexed feature yields an empty result; the
    /// sequence simply carries no annotation.
    pub fn features_in(
        &self,
        annotation: &Annotation,
        seqid: &str,
        start: i64,
        end: i64,
        strand: Strand,
    ) -> Vec<FeatureId> {
        let tree = match self.trees.get(seqid) {
            Some(tree) => tree,
            None => {
                warn!("no annotations for {}", seqid);
                return Vec::new();
            }
        };
        tree.find(start..end)
            .map(|entry| *entry.data())
            .filter(|id| annotation.feature(*id).strand == strand)
            .collect()
    }
}
