use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::errors::SliceError;

/// The strand of a [`Feature`]
///
/// All geometric reasoning during slicing is strand-relative: on the minus
/// strand 5'→3' follows decreasing physical position and a feature's `start`
/// is its larger coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    pub fn is_plus(&self) -> bool {
        matches!(self, Strand::Plus)
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Strand::Plus => "+",
                Strand::Minus => "-",
            }
        )
    }
}

/// The kind of annotation edge a [`Feature`] marks
///
/// Feature kinds form a small, closed set; the slicer copies the kind
/// verbatim when it splits a feature at a border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureKind {
    TranscriptionStart,
    TranscriptionStop,
    CodingStart,
    CodingStop,
    SpliceDonor,
    SpliceAcceptor,
    ErrorOpen,
    ErrorClose,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            FeatureKind::TranscriptionStart => "transcription_start",
            FeatureKind::TranscriptionStop => "transcription_stop",
            FeatureKind::CodingStart => "coding_start",
            FeatureKind::CodingStop => "coding_stop",
            FeatureKind::SpliceDonor => "splice_donor",
            FeatureKind::SpliceAcceptor => "splice_acceptor",
            FeatureKind::ErrorOpen => "error_open",
            FeatureKind::ErrorClose => "error_close",
        };
        write!(f, "{}", s)
    }
}

/// Arena index of a [`Coordinate`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CoordinateId(pub usize);

/// Arena index of a [`SuperLocus`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SuperLocusId(pub usize);

/// Arena index of a [`Transcript`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TranscriptId(pub usize);

/// Arena index of a [`TranscribedPiece`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub usize);

/// Arena index of a [`Feature`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureId(pub usize);

/// A coordinate window `[start, end)` on one sequence
///
/// Slice windows are supplied externally, disjoint and ordered per seqid.
/// They are created once and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub id: CoordinateId,
    pub seqid: String,
    pub start: i64,
    pub end: i64,
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}-{}", self.seqid, self.start, self.end)
    }
}

/// A gene-level container for one or more transcripts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperLocus {
    pub id: SuperLocusId,
    pub given_id: Option<String>,
    pub transcripts: Vec<TranscriptId>,
}

/// An ordered chain of features describing one RNA product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub id: TranscriptId,
    pub given_id: Option<String>,
    pub super_locus: SuperLocusId,
    pub pieces: Vec<PieceId>,
}

/// A contiguous run of a transcript's features within one coordinate window
///
/// Invariant: all features of a piece share one coordinate and one strand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscribedPiece {
    pub id: PieceId,
    pub transcript: TranscriptId,
    pub features: Vec<FeatureId>,
}

/// A single positioned annotation edge
///
/// `start` is the 5' position and `end` the 3'-exclusive position in
/// transcription order, so on the minus strand `start > end`. The two
/// biological flags record whether the respective boundary is real biology
/// or an artifact of a border split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub given_id: Option<String>,
    pub kind: FeatureKind,
    pub seqid: String,
    pub start: i64,
    pub end: i64,
    pub strand: Strand,
    pub coordinate: CoordinateId,
    pub piece: PieceId,
    pub start_is_biological_start: bool,
    pub end_is_biological_end: bool,
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}:{}-{} ({})",
            self.kind, self.seqid, self.start, self.end, self.strand
        )
    }
}

/// Entities that can be registered in a spatial index
pub trait SpatialIndexable {
    fn seqid(&self) -> &str;
    /// The single position the entity is indexed under
    fn index_point(&self) -> i64;
}

impl SpatialIndexable for Feature {
    fn seqid(&self) -> &str {
        &self.seqid
    }

    fn index_point(&self) -> i64 {
        self.start
    }
}

/// Entities that can be cut at a slice border
pub trait Splittable: Sized {
    /// Clones the downstream remainder from `cut` onward, to be registered
    /// under `id` as part of `piece`. Must be called before [`truncate_at`],
    /// while the entity still carries its full extent.
    ///
    /// [`truncate_at`]: Splittable::truncate_at
    fn split_downstream(&self, cut: i64, id: FeatureId, piece: PieceId) -> Self;

    /// Cuts the entity at `cut`, marking the new end as artificial
    fn truncate_at(&mut self, cut: i64);
}

impl Splittable for Feature {
    fn split_downstream(&self, cut: i64, id: FeatureId, piece: PieceId) -> Self {
        Feature {
            id,
            // the clone is an artifact of slicing, it keeps no public id
            given_id: None,
            kind: self.kind,
            seqid: self.seqid.clone(),
            start: cut,
            end: self.end,
            strand: self.strand,
            // the remainder lies outside the new window and stays on the
            // template's coordinate until a later slice picks it up
            coordinate: self.coordinate,
            piece,
            start_is_biological_start: false,
            end_is_biological_end: self.end_is_biological_end,
        }
    }

    fn truncate_at(&mut self, cut: i64) {
        self.end = cut;
        self.end_is_biological_end = false;
    }
}

/// Arena owning every record of one genome's annotation
///
/// # Examples
///
/// ```rust
/// use genoslice::models::{Annotation, FeatureKind, Strand};
///
/// let mut ann = Annotation::new();
/// let coord = ann.new_coordinate("chr1", 0, 10_000);
/// let locus = ann.new_super_locus(Some("gene-1"));
/// let tx = ann.new_transcript(locus, Some("tx-1"));
/// let piece = ann.new_piece(tx);
/// let feature = ann.new_feature(
///     piece,
///     FeatureKind::TranscriptionStart,
///     "chr1",
///     500,
///     2500,
///     Strand::Plus,
///     coord,
///     None,
/// );
/// assert_eq!(ann.feature(feature).piece, piece);
/// assert_eq!(ann.piece(piece).features, vec![feature]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Annotation {
    coordinates: Vec<Coordinate>,
    super_loci: Vec<SuperLocus>,
    transcripts: Vec<Transcript>,
    pieces: Vec<TranscribedPiece>,
    features: Vec<Feature>,
}

impl Annotation {
    pub fn new() -> Self {
        Annotation::default()
    }

    pub fn new_coordinate(&mut self, seqid: &str, start: i64, end: i64) -> CoordinateId {
        let id = CoordinateId(self.coordinates.len());
        self.coordinates.push(Coordinate {
            id,
            seqid: seqid.to_string(),
            start,
            end,
        });
        id
    }

    pub fn new_super_locus(&mut self, given_id: Option<&str>) -> SuperLocusId {
        let id = SuperLocusId(self.super_loci.len());
        self.super_loci.push(SuperLocus {
            id,
            given_id: given_id.map(String::from),
            transcripts: Vec::new(),
        });
        id
    }

    pub fn new_transcript(
        &mut self,
        super_locus: SuperLocusId,
        given_id: Option<&str>,
    ) -> TranscriptId {
        let id = TranscriptId(self.transcripts.len());
        self.transcripts.push(Transcript {
            id,
            given_id: given_id.map(String::from),
            super_locus,
            pieces: Vec::new(),
        });
        self.super_loci[super_locus.0].transcripts.push(id);
        id
    }

    pub fn new_piece(&mut self, transcript: TranscriptId) -> PieceId {
        let id = PieceId(self.pieces.len());
        self.pieces.push(TranscribedPiece {
            id,
            transcript,
            features: Vec::new(),
        });
        self.transcripts[transcript.0].pieces.push(id);
        id
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_feature(
        &mut self,
        piece: PieceId,
        kind: FeatureKind,
        seqid: &str,
        start: i64,
        end: i64,
        strand: Strand,
        coordinate: CoordinateId,
        given_id: Option<&str>,
    ) -> FeatureId {
        let id = FeatureId(self.features.len());
        self.features.push(Feature {
            id,
            given_id: given_id.map(String::from),
            kind,
            seqid: seqid.to_string(),
            start,
            end,
            strand,
            coordinate,
            piece,
            start_is_biological_start: true,
            end_is_biological_end: true,
        });
        self.pieces[piece.0].features.push(id);
        id
    }

    /// Splits `template` at `cut`: the downstream remainder becomes a new
    /// feature registered in `piece`, the template is truncated in place.
    /// Returns the id of the new feature.
    pub fn split_feature(&mut self, template: FeatureId, cut: i64, piece: PieceId) -> FeatureId {
        let id = FeatureId(self.features.len());
        let downstream = self.features[template.0].split_downstream(cut, id, piece);
        self.features.push(downstream);
        self.pieces[piece.0].features.push(id);
        self.features[template.0].truncate_at(cut);
        id
    }

    pub fn coordinate(&self, id: CoordinateId) -> &Coordinate {
        &self.coordinates[id.0]
    }

    pub fn super_locus(&self, id: SuperLocusId) -> &SuperLocus {
        &self.super_loci[id.0]
    }

    pub fn transcript(&self, id: TranscriptId) -> &Transcript {
        &self.transcripts[id.0]
    }

    pub fn piece(&self, id: PieceId) -> &TranscribedPiece {
        &self.pieces[id.0]
    }

    pub fn feature(&self, id: FeatureId) -> &Feature {
        &self.features[id.0]
    }

    pub fn features(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    pub fn super_loci(&self) -> impl Iterator<Item = &SuperLocus> {
        self.super_loci.iter()
    }

    /// All feature ids of a transcript, across all of its pieces
    pub fn transcript_features(&self, transcript: TranscriptId) -> Vec<FeatureId> {
        self.transcripts[transcript.0]
            .pieces
            .iter()
            .flat_map(|piece| self.pieces[piece.0].features.iter().copied())
            .collect()
    }

    /// Moves a feature from `old_piece` to `new_piece`
    ///
    /// Fails with [`SliceError::InvariantViolation`] if the feature is not
    /// currently part of `old_piece`; a stale swap intent means the queue and
    /// the record graph have diverged.
    pub fn swap_piece(
        &mut self,
        feature: FeatureId,
        old_piece: PieceId,
        new_piece: PieceId,
    ) -> Result<(), SliceError> {
        if self.features[feature.0].piece != old_piece {
            return Err(SliceError::invariant(format!(
                "feature {:?} is not part of piece {:?}, cannot swap to {:?}",
                feature, old_piece, new_piece
            )));
        }
        let features = &mut self.pieces[old_piece.0].features;
        let at = features
            .iter()
            .position(|f| *f == feature)
            .ok_or_else(|| {
                SliceError::invariant(format!(
                    "piece {:?} does not list feature {:?}",
                    old_piece, feature
                ))
            })?;
        features.remove(at);
        self.pieces[new_piece.0].features.push(feature);
        self.features[feature.0].piece = new_piece;
        Ok(())
    }

    /// Reassigns a feature to a new coordinate window
    pub fn swap_coordinate(&mut self, feature: FeatureId, new_coordinate: CoordinateId) {
        self.features[feature.0].coordinate = new_coordinate;
    }
}
