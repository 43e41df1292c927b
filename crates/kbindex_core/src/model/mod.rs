//! Record types recovered from markdown notes.
//!
//! # Responsibility
//! - Define the immutable records produced by extraction.
//! - Keep one canonical shape consumed by every index builder.
//!
//! # Invariants
//! - Records are created once during extraction and never mutated.
//! - `TaskRecord::status` is always one of the five known markers.

pub mod link;
pub mod note;
pub mod task;
