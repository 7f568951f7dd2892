//! Data model for outline extraction.
//!
//! This module defines the types that flow through the pipeline: the
//! [`TextFragment`] records produced by the extraction adapter, and the
//! [`Outline`] / [`HeadingEntry`] output that the assembler emits.

mod fragment;
mod outline;

pub use fragment::TextFragment;
pub use outline::{HeadingEntry, HeadingLevel, Outline};
