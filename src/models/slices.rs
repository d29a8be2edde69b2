use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::errors::ReadWriteError;

/// One externally supplied slice window, the only input describing where
/// the annotation is to be cut
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceSpec {
    pub seqid: String,
    pub start: i64,
    pub end: i64,
    pub slice_id: String,
}

#[derive(Debug, Deserialize)]
struct SliceWindow {
    start: i64,
    end: i64,
    slice_id: String,
}

#[derive(Debug, Deserialize)]
struct SlicedSequence {
    seqid: String,
    slices: Vec<SliceWindow>,
}

/// The slice document produced by the external sequence slicer
///
/// The document lists, per sequence, the ordered and disjoint windows the
/// sequence was cut into. [`slice_specs`](SequenceSlices::slice_specs)
/// flattens it into the ordered stream the [`SliceController`] consumes.
///
/// [`SliceController`]: crate::slicer::SliceController
///
/// # Examples
///
/// ```rust
/// use genoslice::models::SequenceSlices;
///
/// let doc = r#"{"sequences": [
///     {"seqid": "chr1", "slices": [
///         {"start": 0, "end": 1000, "slice_id": "chr1-0"},
///         {"start": 1000, "end": 2000, "slice_id": "chr1-1"}
///     ]}
/// ]}"#;
/// let slices = SequenceSlices::from_reader(doc.as_bytes()).unwrap();
/// let specs = slices.slice_specs();
/// assert_eq!(specs.len(), 2);
/// assert_eq!(specs[1].slice_id, "chr1-1");
/// ```
#[derive(Debug, Deserialize)]
pub struct SequenceSlices {
    sequences: Vec<SlicedSequence>,
}

impl SequenceSlices {
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, ReadWriteError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// The ordered slice windows, flattened across sequences
    pub fn slice_specs(&self) -> Vec<SliceSpec> {
        let mut specs = Vec::new();
        for seq in &self.sequences {
            for slice in &seq.slices {
                specs.push(SliceSpec {
                    seqid: seq.seqid.clone(),
                    start: slice.start,
                    end: slice.end,
                    slice_id: slice.slice_id.clone(),
                });
            }
        }
        specs
    }
}
