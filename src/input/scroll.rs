/// List scrolling
use crate::App;

impl App {
    /// Move the selection by `delta` rows, as the mouse wheel does
    pub fn handle_mouse_scroll(&mut self, delta: i16) {
        let steps = delta.unsigned_abs();
        for _ in 0..steps {
            if delta > 0 {
                self.select_next();
            } else {
                self.select_previous();
            }
        }
    }

    /// Adjust the scroll offset so the selected row is on screen.
    ///
    /// Keeps `config.list.scroll_margin` rows of context above and below the
    /// selection when the list is long enough.
    pub fn ensure_selection_visible(&mut self, visible_rows: usize) {
        let len = self.store.len();
        if visible_rows == 0 || len == 0 {
            self.scroll_offset = 0;
            return;
        }

        let max_scroll = len.saturating_sub(visible_rows);
        let Some(selected) = self.selected else {
            self.scroll_offset = self.scroll_offset.min(max_scroll);
            return;
        };

        // A margin bigger than half the view would make the view jump on every move
        let margin = self
            .config
            .list
            .scroll_margin
            .min(visible_rows.saturating_sub(1) / 2);

        if selected < self.scroll_offset + margin {
            self.scroll_offset = selected.saturating_sub(margin);
        } else if selected + margin >= self.scroll_offset + visible_rows {
            self.scroll_offset = selected + margin + 1 - visible_rows;
        }

        self.scroll_offset = self.scroll_offset.min(max_scroll);
    }
}
