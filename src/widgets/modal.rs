use crate::form::{AddForm, FormField};
use crate::widgets::cursor::{advance, clamp_to_area, CursorSupport};
use ratatui::prelude::Position;
use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// A centered modal frame for dialogs
pub struct Modal<'a> {
    title: &'a str,
    content: Vec<Line<'a>>,
    width: u16,
    height: u16,
}

impl<'a> Modal<'a> {
    pub fn new(title: &'a str) -> Self {
        Self {
            title,
            content: Vec::new(),
            width: 60,
            height: 20,
        }
    }

    pub fn content(mut self, content: Vec<Line<'a>>) -> Self {
        self.content = content;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: u16) -> Self {
        self.height = height;
        self
    }

    /// Calculate the centered area for the modal
    pub fn centered_rect(&self, area: Rect) -> Rect {
        let width = self.width.min(area.width);
        let height = self.height.min(area.height);

        let popup_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length((area.height - height) / 2),
                Constraint::Length(height),
                Constraint::Min(0),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length((area.width - width) / 2),
                Constraint::Length(width),
                Constraint::Min(0),
            ])
            .split(popup_layout[1])[1]
    }

    /// Area inside the borders, where content is drawn
    pub fn inner_area(&self, area: Rect) -> Rect {
        Block::default()
            .borders(Borders::ALL)
            .inner(self.centered_rect(area))
    }
}

impl Widget for Modal<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let modal_area = self.centered_rect(area);

        Clear.render(modal_area, buf);

        let border_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let title_style = Style::default()
            .fg(Color::White)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.title), title_style))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(Color::Black));

        let inner_area = block.inner(modal_area);
        block.render(modal_area, buf);

        Paragraph::new(self.content)
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Left)
            .render(inner_area, buf);
    }
}

pub const ADD_DIALOG_TITLE: &str = "Add Shopping Item";
const FIELD_PROMPT: &str = "> ";
const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 8;

/// The "Add Shopping Item" dialog: name and quantity fields plus a key hint
pub struct AddItemDialog<'a> {
    form: &'a AddForm,
}

impl<'a> AddItemDialog<'a> {
    pub fn new(form: &'a AddForm) -> Self {
        Self { form }
    }

    fn modal(&self) -> Modal<'a> {
        Modal::new(ADD_DIALOG_TITLE)
            .width(DIALOG_WIDTH)
            .height(DIALOG_HEIGHT)
    }

    fn field_line(&self, field: FormField) -> Line<'a> {
        let (text, active) = match field {
            FormField::Name => (self.form.name.as_str(), self.form.focus == FormField::Name),
            FormField::Quantity => (
                self.form.quantity.as_str(),
                self.form.focus == FormField::Quantity,
            ),
        };

        let prompt_style = if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Line::from(vec![
            Span::styled(FIELD_PROMPT, prompt_style),
            Span::styled(text, Style::default().fg(Color::White)),
        ])
        .style(Style::default().bg(Color::Rgb(30, 30, 50)))
    }

    /// Line inside the modal holding `field`
    fn field_row(field: FormField) -> u16 {
        match field {
            FormField::Name => 1,
            FormField::Quantity => 3,
        }
    }
}

impl Widget for AddItemDialog<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        let label_style = Style::default().fg(Color::Gray);
        let hint_style = Style::default().fg(Color::DarkGray);

        let content = vec![
            Line::from(Span::styled("Name", label_style)),
            self.field_line(FormField::Name),
            Line::from(Span::styled("Quantity", label_style)),
            self.field_line(FormField::Quantity),
            Line::from(""),
            Line::from(Span::styled(
                "Enter: Add   Esc: Cancel   Tab: Next field",
                hint_style,
            )),
        ];

        self.modal().content(content).render(area, buf);
    }
}

impl CursorSupport for AddItemDialog<'_> {
    /// Cursor at the end of the focused field; `logical_pos` is (text length, unused)
    fn calculate_cursor_position(&self, logical_pos: (usize, usize), area: Rect) -> Position {
        let inner_area = self.modal().inner_area(area);

        let cursor_x = advance(inner_area.x, FIELD_PROMPT.len().saturating_add(logical_pos.0));
        let cursor_y = inner_area.y.saturating_add(Self::field_row(self.form.focus));

        clamp_to_area(Position::new(cursor_x, cursor_y), inner_area)
    }

    fn get_cursor_context(&self) -> &str {
        "add_dialog"
    }
}
