//! Carousel over the suggestion catalog.
//!
//! The carousel shows a contiguous window of items. The window size follows
//! the viewport width through fixed breakpoints, and the start index is kept
//! within `0..=max_start_index()` at all times, including after the window
//! is resized.

use crate::suggestions::{self, Suggestion};

/// Window size used before the first viewport signal arrives.
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Breakpoints as `(minimum width, window size)`, widest first.
const BREAKPOINTS: &[(u32, usize)] = &[(1280, 5), (1024, 4), (768, 3), (640, 2)];

/// Window size for a viewport width.
///
/// ## Examples
///
/// ```
/// use read_aloud::carousel::window_size_for_width;
///
/// assert_eq!(window_size_for_width(1280), 5);
/// assert_eq!(window_size_for_width(800), 3);
/// assert_eq!(window_size_for_width(320), 1);
/// ```
pub fn window_size_for_width(width: u32) -> usize {
    BREAKPOINTS
        .iter()
        .find(|(min_width, _)| width >= *min_width)
        .map(|(_, size)| *size)
        .unwrap_or(1)
}

/// Navigation state of the carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    start_index: usize,
    window_size: usize,
    total_items: usize,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(suggestions::suggestions().len())
    }
}

impl Carousel {
    /// A carousel over `total_items` items with the default window size.
    pub fn new(total_items: usize) -> Self {
        Self {
            start_index: 0,
            window_size: DEFAULT_WINDOW_SIZE,
            total_items,
        }
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// The largest valid start index: `max(0, total_items - window_size)`.
    pub fn max_start_index(&self) -> usize {
        self.total_items.saturating_sub(self.window_size)
    }

    /// Move the window one item forward, stopping at the end.
    pub fn advance(&mut self) {
        self.start_index = (self.start_index + 1).min(self.max_start_index());
    }

    /// Move the window one item back, stopping at the start.
    pub fn retreat(&mut self) {
        self.start_index = self.start_index.saturating_sub(1);
    }

    pub fn can_advance(&self) -> bool {
        self.start_index < self.max_start_index()
    }

    pub fn can_retreat(&self) -> bool {
        self.start_index > 0
    }

    /// Apply a viewport width signal.
    pub fn resize(&mut self, width: u32) {
        self.set_window_size(window_size_for_width(width));
    }

    /// Change the window size and re-clamp the start index.
    ///
    /// A zero window size is treated as one.
    pub fn set_window_size(&mut self, window_size: usize) {
        let window_size = window_size.max(1);
        if window_size != self.window_size {
            tracing::trace!(
                from = self.window_size,
                to = window_size,
                "Carousel window resized"
            );
        }
        self.window_size = window_size;
        self.start_index = self.start_index.min(self.max_start_index());
    }

    /// Indices of the visible items, clipped to the item count.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        let end = (self.start_index + self.window_size).min(self.total_items);
        self.start_index.min(end)..end
    }

    /// The visible suggestions.
    pub fn visible_slice(&self) -> &'static [Suggestion] {
        let range = self.visible_range();
        suggestions::slice(range.start, range.len())
    }
}
