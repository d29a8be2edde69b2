#![doc = include_str!("../README.md")]

pub mod classify;
pub mod index;
pub mod models;
pub mod queue;
pub mod slicer;
pub mod store;
pub mod tests;
pub mod trim;
pub mod utils;

pub use crate::models::{Annotation, SequenceSlices, SliceSpec};
pub use crate::slicer::SliceController;
pub use crate::store::{AnnotationStore, MemoryStore};
pub use crate::utils::errors::SliceError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
