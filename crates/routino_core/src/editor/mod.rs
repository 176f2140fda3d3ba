//! Privacy-blur editor pipeline.
//!
//! # Responsibility
//! - Segment note content into tokens and decide their visibility.
//! - Keep the caret stable across destructive re-rendering.
//! - Debounce segmentation passes triggered by typing.
//!
//! # Invariants
//! - Everything here is single-threaded; the scheduler's `Processing` flag is
//!   the only exclusion guard.
//! - Rendering technology is reached only through `host::RenderHost`.

pub mod caret;
pub mod counters;
pub mod edit;
pub mod format;
pub mod host;
pub mod reveal;
pub mod scheduler;
pub mod session;
pub mod tokenizer;
