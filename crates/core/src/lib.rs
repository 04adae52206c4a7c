//! Domain types and pure logic for comic generation.
//!
//! Nothing in this crate performs I/O: the segmenter, prompt templates,
//! generation parameters and validation rules are shared by the model,
//! pipeline and API layers.

pub mod comic;
pub mod error;
pub mod generation;
pub mod prompts;
pub mod segmenter;
pub mod types;
pub mod validation;
