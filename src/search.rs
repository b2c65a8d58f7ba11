//! Sentence-level term search.
//!
//! The [`MatchLocator`] scans each page of a document sentence by sentence
//! and records one [`Match`] for every sentence containing at least one
//! selected term, together with a [`context_window`] of neighbouring
//! sentences. The per-page results form a [`MatchSet`].

pub mod locator;
pub mod matches;
pub mod window;

pub use locator::MatchLocator;
pub use matches::{ContextRadius, Match, MatchSet};
pub use window::{context_range, context_window};
