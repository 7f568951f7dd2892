//! The heuristic classification engine.
//!
//! Processing for one document is strictly sequential: the font baseline is
//! computed first, every fragment is scored against it, the title is taken
//! from the first page, and the assembler merges the surviving candidates
//! into the final [`Outline`](crate::model::Outline).

mod assembler;
mod baseline;
mod patterns;
mod scorer;
mod title;

pub use assembler::assemble;
pub use baseline::{compute_baseline, FontBaseline};
pub use patterns::{MarkerPattern, PatternTable};
pub use scorer::{
    signals, HeadingScorer, ScoreConfig, ScoreWeights, ScoredCandidate, Signal, SignalInput,
};
pub use title::{extract_title, TitleConfig};
