use crate::form::{EditDraft, FormField};
use crate::store::Item;
use crate::widgets::cursor::{advance, CursorSupport};
use ratatui::prelude::Position;
use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub const ADD_BUTTON_LABEL: &str = "[ Add Item ]";
pub const EDIT_LABEL: &str = "[edit]";
pub const DELETE_LABEL: &str = "[del]";
pub const SAVE_LABEL: &str = "[save]";

const QUANTITY_WIDTH: u16 = 14;
const QUANTITY_PREFIX: &str = "Qty: ";

/// What a click on part of a row asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Select,
    Edit,
    Delete,
    Save,
}

/// Column areas of a single list row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub name: Rect,
    pub quantity: Rect,
    pub edit: Rect,
    pub delete: Rect,
}

impl RowLayout {
    pub fn new(row: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(QUANTITY_WIDTH),
                Constraint::Length(EDIT_LABEL.len() as u16),
                Constraint::Length(1),
                Constraint::Length(DELETE_LABEL.len() as u16),
            ])
            .split(row);

        Self {
            name: columns[0],
            quantity: columns[1],
            edit: columns[2],
            delete: columns[4],
        }
    }

    /// Action for a click at column `x`; the edit slot doubles as save while editing
    pub fn action_at(&self, x: u16, editing: bool) -> RowAction {
        let hit = |rect: Rect| x >= rect.x && x < rect.x + rect.width;

        if hit(self.edit) {
            if editing {
                RowAction::Save
            } else {
                RowAction::Edit
            }
        } else if hit(self.delete) && !editing {
            RowAction::Delete
        } else {
            RowAction::Select
        }
    }
}

/// Outer block drawn around the list
pub fn list_block(focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    Block::default()
        .title(Span::styled(
            " Shopping List ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Area of the add button inside the header line
pub fn add_button_rect(header: Rect) -> Rect {
    let width = (ADD_BUTTON_LABEL.len() as u16).min(header.width);
    Rect {
        x: header.x + (header.width - width) / 2,
        y: header.y,
        width,
        height: header.height.min(1),
    }
}

/// The "Add Item" button shown above the list
pub struct AddButton {
    focused: bool,
}

impl AddButton {
    pub fn new() -> Self {
        Self { focused: true }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl Default for AddButton {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for AddButton {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let style = if self.focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray).bg(Color::DarkGray)
        };

        Paragraph::new(Line::from(Span::styled(ADD_BUTTON_LABEL, style)))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

/// Rows of the shopping list, one line per item.
///
/// The item in edit mode is drawn as an inline editor showing the draft
/// text instead of the stored values.
pub struct ItemList<'a> {
    items: &'a [Item],
    selected: Option<usize>,
    scroll_offset: usize,
    draft: Option<&'a EditDraft>,
    show_ids: bool,
}

impl<'a> ItemList<'a> {
    pub fn new(items: &'a [Item]) -> Self {
        Self {
            items,
            selected: None,
            scroll_offset: 0,
            draft: None,
            show_ids: false,
        }
    }

    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }

    pub fn scroll_offset(mut self, scroll_offset: usize) -> Self {
        self.scroll_offset = scroll_offset;
        self
    }

    pub fn draft(mut self, draft: Option<&'a EditDraft>) -> Self {
        self.draft = draft;
        self
    }

    pub fn show_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }

    /// Screen row of `index`, if it is scrolled into view
    pub fn row_area(&self, index: usize, area: Rect) -> Option<Rect> {
        let offset = index.checked_sub(self.scroll_offset)?;
        if offset >= area.height as usize {
            return None;
        }

        Some(Rect {
            x: area.x,
            y: area.y + offset as u16,
            width: area.width,
            height: 1,
        })
    }

    fn name_prefix(&self, item: &Item) -> String {
        if self.show_ids {
            format!(" {} ", item.id)
        } else {
            " ".to_string()
        }
    }

    fn render_row(&self, item: &Item, selected: bool, row: Rect, buf: &mut TuiBuffer) {
        let layout = RowLayout::new(row);
        let row_style = if selected {
            Style::default().bg(Color::Rgb(30, 40, 60))
        } else {
            Style::default()
        };
        buf.set_style(row, row_style);

        let prefix = self.name_prefix(item);
        let name_line = Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::DarkGray)),
            Span::styled(
                item.name.as_str(),
                if selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                },
            ),
        ]);
        Paragraph::new(name_line).render(layout.name, buf);

        Paragraph::new(format!("{}{}", QUANTITY_PREFIX, item.quantity))
            .style(Style::default().fg(Color::LightBlue))
            .render(layout.quantity, buf);

        Paragraph::new(EDIT_LABEL)
            .style(Style::default().fg(Color::Yellow))
            .render(layout.edit, buf);
        Paragraph::new(DELETE_LABEL)
            .style(Style::default().fg(Color::Red))
            .render(layout.delete, buf);
    }

    fn render_editor_row(&self, item: &Item, draft: &EditDraft, row: Rect, buf: &mut TuiBuffer) {
        let layout = RowLayout::new(row);
        buf.set_style(row, Style::default().bg(Color::Rgb(20, 20, 30)));

        let field_style = |field: FormField| {
            if draft.focus == field {
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Rgb(30, 30, 50))
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::UNDERLINED)
            }
        };

        let name_line = Line::from(vec![
            Span::styled(self.name_prefix(item), Style::default().fg(Color::Cyan)),
            Span::styled(draft.name.as_str(), field_style(FormField::Name)),
        ]);
        Paragraph::new(name_line).render(layout.name, buf);

        let quantity_line = Line::from(vec![
            Span::styled(QUANTITY_PREFIX, Style::default().fg(Color::LightBlue)),
            Span::styled(draft.quantity.as_str(), field_style(FormField::Quantity)),
        ]);
        Paragraph::new(quantity_line).render(layout.quantity, buf);

        Paragraph::new(SAVE_LABEL)
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )
            .render(layout.edit, buf);
    }
}

impl Widget for ItemList<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        if self.items.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No items yet. Press 'a' to add one.",
                Style::default().fg(Color::DarkGray),
            )))
            .alignment(Alignment::Center)
            .render(area, buf);
            return;
        }

        for (index, item) in self.items.iter().enumerate().skip(self.scroll_offset) {
            let Some(row) = self.row_area(index, area) else {
                break;
            };

            match self.draft.filter(|draft| draft.id == item.id) {
                Some(draft) if item.is_editing => self.render_editor_row(item, draft, row, buf),
                _ => self.render_row(item, self.selected == Some(index), row, buf),
            }
        }
    }
}

impl CursorSupport for ItemList<'_> {
    /// Cursor inside the inline editor; `logical_pos` is (text length, item index)
    fn calculate_cursor_position(&self, logical_pos: (usize, usize), area: Rect) -> Position {
        let (text_len, index) = logical_pos;
        let Some(row) = self.row_area(index, area) else {
            return Position::new(area.x, area.y);
        };
        let layout = RowLayout::new(row);

        let (field_area, prefix_len) = match self.draft.map(|draft| draft.focus) {
            Some(FormField::Quantity) => (layout.quantity, QUANTITY_PREFIX.len()),
            _ => {
                let prefix_len = self
                    .items
                    .get(index)
                    .map(|item| self.name_prefix(item).chars().count())
                    .unwrap_or(1);
                (layout.name, prefix_len)
            }
        };

        let max_x = advance(field_area.x, field_area.width.saturating_sub(1).into());
        let x = advance(field_area.x, prefix_len.saturating_add(text_len)).min(max_x);
        Position::new(x, row.y)
    }

    fn get_cursor_context(&self) -> &str {
        "item_editor"
    }
}
