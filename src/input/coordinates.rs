// Screen layout and mapping of mouse positions onto list rows

use crate::widgets::item_list::{add_button_rect, list_block, RowAction, RowLayout};
use crate::App;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

/// Areas of the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Line holding the add button
    pub header: Rect,
    /// Bordered list block
    pub list: Rect,
    /// Rows inside the list block
    pub list_inner: Rect,
    /// Bottom status line, when shown
    pub status: Option<Rect>,
}

/// Split the terminal area the same way the renderer does
pub fn screen_layout(area: Rect, show_status_bar: bool) -> ScreenLayout {
    let status_height = if show_status_bar { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Add button
            Constraint::Min(1),                // List
            Constraint::Length(status_height), // Status line
        ])
        .split(area);

    let list = chunks[1];
    ScreenLayout {
        header: chunks[0],
        list,
        list_inner: list_block(true).inner(list),
        status: show_status_bar.then_some(chunks[2]),
    }
}

/// What a mouse position points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenHit {
    AddButton,
    Row { index: usize, action: RowAction },
}

/// Convert screen coordinates into the element under them
pub fn screen_to_hit(app: &App, screen: Rect, mouse_x: u16, mouse_y: u16) -> Option<ScreenHit> {
    let layout = screen_layout(screen, app.config.ui.show_status_bar);
    let position = Position::new(mouse_x, mouse_y);

    if add_button_rect(layout.header).contains(position) {
        return Some(ScreenHit::AddButton);
    }

    let inner = layout.list_inner;
    if !inner.contains(position) {
        return None;
    }

    let index = app.scroll_offset + (mouse_y - inner.y) as usize;
    let item = app.store.items().get(index)?;

    let row = Rect {
        y: mouse_y,
        height: 1,
        ..inner
    };
    let action = RowLayout::new(row).action_at(mouse_x, item.is_editing);

    Some(ScreenHit::Row { index, action })
}

/// Terminal area, falling back to 80x24 when it cannot be queried
pub fn terminal_area() -> Rect {
    let (width, height) = ratatui::crossterm::terminal::size().unwrap_or((80, 24));
    Rect::new(0, 0, width, height)
}
