//! Volatile note storage.
//!
//! # Responsibility
//! - Hold the ordered note collection for one editor process.
//! - Enforce the single-active-note invariant on every mutation.
//!
//! # Invariants
//! - Notes live in memory only; nothing is written to disk.

pub mod note_store;
