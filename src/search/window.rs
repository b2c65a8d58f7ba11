//! Context windows around a matched sentence.

use std::ops::Range;

/// The index range `[max(0, i-k), min(len-1, i+k)]` (end exclusive here).
///
/// Returns an empty range when `index` is not a valid sentence index.
pub fn context_range(len: usize, index: usize, radius: usize) -> Range<usize> {
    if index >= len {
        return 0..0;
    }
    index.saturating_sub(radius)..index.saturating_add(radius).saturating_add(1).min(len)
}

/// The sentences within `radius` of `index`, including `index` itself.
///
/// Clamps at both ends of `sentences` and never panics.
///
/// ```
/// use termscope::search::context_window;
///
/// let sentences = ["a", "b", "c", "d"];
/// assert_eq!(context_window(&sentences, 0, 2), &["a", "b", "c"]);
/// assert_eq!(context_window(&sentences, 3, 1), &["c", "d"]);
/// ```
pub fn context_window<T>(sentences: &[T], index: usize, radius: usize) -> &[T] {
    &sentences[context_range(sentences.len(), index, radius)]
}
