//! Selection movement over the card grid.
//!
//! Cards are laid out row by row, so the selection is a flat index and
//! vertical moves step by the column count.

use super::constants::PAGE_ROWS;

/// Trait for types that support list-style navigation.
pub trait ListNavigator {
    /// Get the currently selected index.
    fn selected(&self) -> usize;

    /// Set the selected index.
    fn set_selected(&mut self, index: usize);

    /// Get the maximum valid index (item count - 1, or 0 if empty).
    fn max_index(&self) -> usize;

    /// Move selection up by count items.
    fn move_up(&mut self, count: usize) {
        let current = self.selected();
        self.set_selected(current.saturating_sub(count));
    }

    /// Move selection down by count items.
    fn move_down(&mut self, count: usize) {
        let current = self.selected();
        let max = self.max_index();
        self.set_selected((current + count).min(max));
    }

    /// Jump to the first item.
    fn jump_to_top(&mut self) {
        self.set_selected(0);
    }

    /// Jump to the last item.
    fn jump_to_bottom(&mut self) {
        self.set_selected(self.max_index());
    }
}

/// Selection state for a grid of cards.
#[derive(Debug, Clone)]
pub struct GridNav {
    selected: usize,
    count: usize,
    columns: usize,
}

impl Default for GridNav {
    fn default() -> Self {
        Self {
            selected: 0,
            count: 0,
            columns: 1,
        }
    }
}

impl GridNav {
    /// Create a navigator for `count` cards in `columns` columns.
    pub fn new(count: usize, columns: usize) -> Self {
        Self {
            selected: 0,
            count,
            columns: columns.max(1),
        }
    }

    /// Update the card count, clamping selection if necessary.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        if self.selected > self.max_index() {
            self.selected = self.max_index();
        }
    }

    /// Update the column count after a resize.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Row of the selected card.
    pub fn selected_row(&self) -> usize {
        self.selected / self.columns
    }

    /// Move one card left, stopping at the first card.
    pub fn left(&mut self) {
        self.move_up(1);
    }

    /// Move one card right, stopping at the last card.
    pub fn right(&mut self) {
        self.move_down(1);
    }

    /// Move one row up.
    pub fn row_up(&mut self) {
        if self.selected >= self.columns {
            self.selected -= self.columns;
        }
    }

    /// Move one row down. On a ragged last row, lands on the last card.
    pub fn row_down(&mut self) {
        if self.selected_row() < self.max_index() / self.columns {
            self.move_down(self.columns);
        }
    }

    pub fn page_up(&mut self) {
        self.move_up(self.columns * PAGE_ROWS);
    }

    pub fn page_down(&mut self) {
        self.move_down(self.columns * PAGE_ROWS);
    }
}

impl ListNavigator for GridNav {
    fn selected(&self) -> usize {
        self.selected
    }

    fn set_selected(&mut self, index: usize) {
        self.selected = index.min(self.max_index());
    }

    fn max_index(&self) -> usize {
        self.count.saturating_sub(1)
    }
}
