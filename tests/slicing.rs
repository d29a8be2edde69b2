//! Full slicing runs over small annotations

use std::collections::BTreeSet;

use genoslice::classify::{classify, Position};
use genoslice::models::{Annotation, FeatureKind, Strand, TranscriptId};
use genoslice::slicer::SliceController;
use genoslice::store::MemoryStore;
use genoslice::tests::annotations::{
    minus_strand_annotation, standard_annotation, two_transcript_annotation,
};
use genoslice::SliceSpec;

fn chr1_slices(bounds: &[(i64, i64)]) -> Vec<SliceSpec> {
    bounds
        .iter()
        .enumerate()
        .map(|(i, &(start, end))| SliceSpec {
            seqid: "chr1".to_string(),
            start,
            end,
            slice_id: format!("chr1-{}", i),
        })
        .collect()
}

/// Physical base positions covered by all features of a transcript
fn covered_positions(ann: &Annotation, tx: TranscriptId) -> BTreeSet<i64> {
    let mut positions = BTreeSet::new();
    for feature_id in ann.transcript_features(tx) {
        let f = ann.feature(feature_id);
        let (low, high) = if f.strand.is_plus() {
            (f.start, f.end)
        } else {
            (f.end + 1, f.start + 1)
        };
        positions.extend(low..high);
    }
    positions
}

/// Every piece must hold features of exactly one coordinate, forming a
/// contiguous, non-overlapping run in transcription order
fn assert_piece_integrity(ann: &Annotation, tx: TranscriptId) {
    for &piece_id in &ann.transcript(tx).pieces {
        let piece = ann.piece(piece_id);
        let coords: BTreeSet<_> = piece
            .features
            .iter()
            .map(|&f| ann.feature(f).coordinate)
            .collect();
        assert!(
            coords.len() <= 1,
            "piece {:?} features span {} coordinates",
            piece_id,
            coords.len()
        );

        let mut intervals: Vec<(i64, i64)> = piece
            .features
            .iter()
            .map(|&f| {
                let f = ann.feature(f);
                if f.strand.is_plus() {
                    (f.start, f.end)
                } else {
                    (f.end + 1, f.start + 1)
                }
            })
            .collect();
        intervals.sort();
        for pair in intervals.windows(2) {
            assert!(
                pair[0].1 <= pair[1].0,
                "piece {:?} features overlap: {:?}",
                piece_id,
                pair
            );
        }
    }
}

/// A two-exon transcript with a 3' point feature: `[500, 1200)`,
/// `[1300, 2500)` and a stop marker at 2500
fn exon_chain(strand: Strand) -> (Annotation, TranscriptId) {
    let mut ann = Annotation::new();
    let coord = ann.new_coordinate("chr1", 0, 10_000);
    let locus = ann.new_super_locus(Some("gene-1"));
    let tx = ann.new_transcript(locus, Some("tx-1"));
    let piece = ann.new_piece(tx);
    // (start, end) per feature in transcription order
    let edges = if strand.is_plus() {
        [(500, 1200), (1300, 2500), (2500, 2500)]
    } else {
        [(2499, 1299), (1199, 499), (499, 499)]
    };
    let kinds = [
        FeatureKind::TranscriptionStart,
        FeatureKind::SpliceAcceptor,
        FeatureKind::TranscriptionStop,
    ];
    for (&(start, end), &kind) in edges.iter().zip(kinds.iter()) {
        ann.new_feature(piece, kind, "chr1", start, end, strand, coord, None);
    }
    (ann, tx)
}

#[test]
fn multi_feature_chain_stays_consistent_plus_strand() {
    let (ann, tx) = exon_chain(Strand::Plus);
    let before = covered_positions(&ann, tx);

    let mut controller = SliceController::new(ann, MemoryStore::new());
    controller
        .slice_annotations(&chr1_slices(&[(0, 1000), (1000, 2000), (2000, 3000)]))
        .unwrap();
    let (ann, _) = controller.into_parts();

    // borders at 1000 and 2000 cut both exons once
    assert_eq!(ann.transcript(tx).pieces.len(), 3);
    assert_eq!(ann.transcript_features(tx).len(), 5);
    assert_eq!(covered_positions(&ann, tx), before);
    assert_piece_integrity(&ann, tx);
}

#[test]
fn multi_feature_chain_stays_consistent_minus_strand() {
    let (ann, tx) = exon_chain(Strand::Minus);
    let before = covered_positions(&ann, tx);

    let mut controller = SliceController::new(ann, MemoryStore::new());
    controller
        .slice_annotations(&chr1_slices(&[(0, 1000), (1000, 2000), (2000, 3000)]))
        .unwrap();
    let (ann, _) = controller.into_parts();

    assert_eq!(ann.transcript(tx).pieces.len(), 3);
    assert_eq!(ann.transcript_features(tx).len(), 5);
    assert_eq!(covered_positions(&ann, tx), before);
    assert_piece_integrity(&ann, tx);
}

#[test]
fn plus_strand_run_splits_at_each_border() {
    let (ann, tx) = standard_annotation();
    let before = covered_positions(&ann, tx);

    let mut controller = SliceController::new(ann, MemoryStore::new());
    controller
        .slice_annotations(&chr1_slices(&[(0, 1000), (1000, 2000), (2000, 3000)]))
        .unwrap();
    let (ann, store) = controller.into_parts();

    // one fragment per crossed segment
    assert_eq!(ann.transcript(tx).pieces.len(), 3);
    let features = ann.transcript_features(tx);
    assert_eq!(features.len(), 3);

    // coverage: no bases gained or lost
    assert_eq!(covered_positions(&ann, tx), before);

    // contiguity: each piece holds features of a single coordinate and strand
    for &piece_id in &ann.transcript(tx).pieces {
        let piece = ann.piece(piece_id);
        let coords: BTreeSet<_> = piece
            .features
            .iter()
            .map(|&f| ann.feature(f).coordinate)
            .collect();
        assert!(coords.len() <= 1);
    }

    // both splits were persisted, every slice of both passes got a window
    assert_eq!(store.created_features.len(), 2);
    assert_eq!(store.created_pieces.len(), 2);
    assert_eq!(store.created_coordinates.len(), 6);
}

#[test]
fn minus_strand_run_walks_in_reverse() {
    let (ann, tx) = minus_strand_annotation();
    let before = covered_positions(&ann, tx);

    let mut controller = SliceController::new(ann, MemoryStore::new());
    controller
        .slice_annotations(&chr1_slices(&[(0, 1000), (1000, 2000), (2000, 3000)]))
        .unwrap();
    let (ann, _) = controller.into_parts();

    assert_eq!(ann.transcript(tx).pieces.len(), 3);
    assert_eq!(covered_positions(&ann, tx), before);

    // the minus-strand cut sits at window.start - 1, exclusive-close in
    // transcription direction
    let ends: BTreeSet<i64> = ann
        .transcript_features(tx)
        .iter()
        .map(|&f| ann.feature(f).end)
        .collect();
    assert!(ends.contains(&1999));
    assert!(ends.contains(&999));
}

#[test]
fn sliced_fragments_resolve_as_upstream_or_detached() {
    let (ann, tx) = standard_annotation();
    let mut controller = SliceController::new(ann, MemoryStore::new());
    controller
        .slice_annotations(&chr1_slices(&[(0, 1000), (1000, 2000), (2000, 3000)]))
        .unwrap();
    let (mut ann, _) = controller.into_parts();

    // the 5'-most fragment against a later window: already resolved
    let first = ann.transcript_features(tx)[0];
    let later = ann.new_coordinate("chr1", 1000, 2000);
    assert_eq!(
        classify(ann.feature(first), ann.coordinate(later), Strand::Plus).unwrap(),
        Position::Upstream
    );
    // and against the opposite-strand pass: unrelated
    assert_eq!(
        classify(ann.feature(first), ann.coordinate(later), Strand::Minus).unwrap(),
        Position::Detached
    );
}

#[test]
fn gene_overlap_without_transcript_overlap_resolves() {
    let (ann, long, short) = two_transcript_annotation();
    let mut controller = SliceController::new(ann, MemoryStore::new());

    // window [1000, 2000) overlaps the gene through tx-long only; tx-short
    // ends at 900 and must pass the no-overlap re-verification
    controller
        .slice_annotations(&chr1_slices(&[(0, 1000), (1000, 2000), (2000, 3000)]))
        .unwrap();
    let (ann, _) = controller.into_parts();

    assert_eq!(ann.transcript(long).pieces.len(), 3);
    assert_eq!(ann.transcript(short).pieces.len(), 1);
    assert_eq!(ann.transcript_features(short).len(), 1);
}

#[test]
fn no_features_are_lost_or_invented() {
    let (ann, long, short) = two_transcript_annotation();
    let n_before = ann.features().count();

    let mut controller = SliceController::new(ann, MemoryStore::new());
    controller
        .slice_annotations(&chr1_slices(&[(0, 1000), (1000, 2000), (2000, 3000)]))
        .unwrap();
    let (ann, store) = controller.into_parts();

    // every new feature is one explicit border duplication
    let n_after = ann.features().count();
    assert_eq!(n_after, n_before + store.created_features.len());

    // every feature still belongs to exactly one piece of its transcript
    for tx in [long, short] {
        for feature_id in ann.transcript_features(tx) {
            let piece = ann.feature(feature_id).piece;
            assert!(ann.piece(piece).features.contains(&feature_id));
            assert_eq!(ann.piece(piece).transcript, tx);
        }
    }
}

#[test]
fn slices_on_other_sequences_are_ignored() {
    let (ann, tx) = standard_annotation();
    let mut controller = SliceController::new(ann, MemoryStore::new());

    let mut slices = chr1_slices(&[(0, 3000)]);
    slices.push(SliceSpec {
        seqid: "chr2".to_string(),
        start: 0,
        end: 5000,
        slice_id: "chr2-0".to_string(),
    });
    controller.slice_annotations(&slices).unwrap();
    let (ann, _) = controller.into_parts();

    // fully contained in the first window, never split
    assert_eq!(ann.transcript(tx).pieces.len(), 1);
    assert_eq!(ann.transcript_features(tx).len(), 1);
}
