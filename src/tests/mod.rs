//! Fixture annotations for unit tests and doc examples

pub mod annotations {
    use crate::models::{Annotation, FeatureKind, Strand, TranscriptId};

    /// One super-locus with one transcript whose single feature spans
    /// `[500, 2500)` on the plus strand of chr1, over a base coordinate
    /// `[0, 10000)`
    pub fn standard_annotation() -> (Annotation, TranscriptId) {
        let mut ann = Annotation::new();
        let coord = ann.new_coordinate("chr1", 0, 10_000);
        let locus = ann.new_super_locus(Some("gene-1"));
        let tx = ann.new_transcript(locus, Some("tx-1"));
        let piece = ann.new_piece(tx);
        ann.new_feature(
            piece,
            FeatureKind::TranscriptionStart,
            "chr1",
            500,
            2500,
            Strand::Plus,
            coord,
            Some("tx-1-span"),
        );
        (ann, tx)
    }

    /// Same geometry on the minus strand: the feature runs `2499..499` in
    /// transcription order, covering physical positions 500..=2499
    pub fn minus_strand_annotation() -> (Annotation, TranscriptId) {
        let mut ann = Annotation::new();
        let coord = ann.new_coordinate("chr1", 0, 10_000);
        let locus = ann.new_super_locus(Some("gene-1"));
        let tx = ann.new_transcript(locus, Some("tx-1"));
        let piece = ann.new_piece(tx);
        ann.new_feature(
            piece,
            FeatureKind::TranscriptionStart,
            "chr1",
            2499,
            499,
            Strand::Minus,
            coord,
            Some("tx-1-span"),
        );
        (ann, tx)
    }

    /// A two-transcript super-locus: `tx-long` spans `[500, 2500)`,
    /// `tx-short` only `[500, 900)`, both on the plus strand
    pub fn two_transcript_annotation() -> (Annotation, TranscriptId, TranscriptId) {
        let mut ann = Annotation::new();
        let coord = ann.new_coordinate("chr1", 0, 10_000);
        let locus = ann.new_super_locus(Some("gene-1"));

        let long = ann.new_transcript(locus, Some("tx-long"));
        let long_piece = ann.new_piece(long);
        ann.new_feature(
            long_piece,
            FeatureKind::TranscriptionStart,
            "chr1",
            500,
            2500,
            Strand::Plus,
            coord,
            None,
        );

        let short = ann.new_transcript(locus, Some("tx-short"));
        let short_piece = ann.new_piece(short);
        ann.new_feature(
            short_piece,
            FeatureKind::TranscriptionStart,
            "chr1",
            500,
            900,
            Strand::Plus,
            coord,
            None,
        );

        (ann, long, short)
    }
}
