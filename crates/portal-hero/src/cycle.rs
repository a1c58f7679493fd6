//! Pure index state machine shared by the word cycler and language rotator.
//!
//! States are `Idle-at-index-i` for `i` in `0..len`; the only transition is
//! `advance`, which moves to `(i + 1) mod len`. There is no terminal state.

use std::sync::Arc;

/// A position in a non-empty, immutable list.
#[derive(Debug, Clone)]
pub struct Cycle<T> {
    items: Arc<[T]>,
    index: usize,
}

impl<T> Cycle<T> {
    /// Start at index 0. Returns `None` for an empty list.
    pub fn new(items: impl Into<Arc<[T]>>) -> Option<Self> {
        let items = items.into();
        if items.is_empty() {
            return None;
        }
        Some(Self { items, index: 0 })
    }

    /// Start at index 0 of a non-empty array.
    pub fn from_array<const N: usize>(items: [T; N]) -> Self {
        const { assert!(N > 0, "cycle must not be empty") };
        Self {
            items: Arc::new(items),
            index: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`; a cycle cannot be built from an empty list.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn current(&self) -> &T {
        &self.items[self.index]
    }

    /// Move to the next item, wrapping after the last. Returns the new index.
    pub fn advance(&mut self) -> usize {
        self.index = (self.index + 1) % self.items.len();
        self.index
    }
}

impl<T: PartialEq> Cycle<T> {
    /// Whether this cycle runs over exactly `items`.
    pub fn has_items(&self, items: &[T]) -> bool {
        *self.items == *items
    }
}
