use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::{Alignment, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use std::collections::HashMap;

/// Represents the alignment of a status bar slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAlignment {
    Left,
    Center,
    Right,
}

/// Represents a single slot in the status bar
#[derive(Debug, Clone)]
pub struct StatusSlot {
    pub id: String,
    pub content: String,
    pub alignment: SlotAlignment,
    pub priority: u8, // Higher priority = shown first within alignment group
    pub style: Style,
    pub visible: bool,
}

impl StatusSlot {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            alignment: SlotAlignment::Left,
            priority: 50,
            style: Style::default().fg(Color::White).bg(Color::Blue),
            visible: true,
        }
    }

    pub fn with_alignment(mut self, alignment: SlotAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// One-line bar of named slots, grouped left, center and right
#[derive(Debug, Clone)]
pub struct StatusBar {
    slots: HashMap<String, StatusSlot>,
    background_style: Style,
    separator: String,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            background_style: Style::default().bg(Color::Blue).fg(Color::White),
            separator: " | ".to_string(),
        }
    }

    /// Add or replace a slot
    pub fn set_slot(&mut self, slot: StatusSlot) {
        self.slots.insert(slot.id.clone(), slot);
    }

    pub fn remove_slot(&mut self, id: &str) {
        self.slots.remove(id);
    }

    pub fn get_slot(&self, id: &str) -> Option<&StatusSlot> {
        self.slots.get(id)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn hide_slot(&mut self, id: &str) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.visible = false;
        }
    }

    pub fn show_slot(&mut self, id: &str) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.visible = true;
        }
    }

    pub fn update_slot_content(&mut self, id: &str, content: impl Into<String>) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.content = content.into();
        }
    }

    pub fn with_background_style(mut self, style: Style) -> Self {
        self.background_style = style;
        self
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Visible slots of one alignment group, highest priority first
    fn group(&self, alignment: SlotAlignment) -> Vec<&StatusSlot> {
        let mut slots: Vec<&StatusSlot> = self
            .slots
            .values()
            .filter(|slot| slot.visible && slot.alignment == alignment)
            .collect();
        slots.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        slots
    }

    fn group_line(&self, alignment: SlotAlignment) -> Line<'_> {
        let mut spans = Vec::new();
        for (i, slot) in self.group(alignment).into_iter().enumerate() {
            if i > 0 && !self.separator.is_empty() {
                spans.push(Span::styled(self.separator.as_str(), self.background_style));
            }
            spans.push(Span::styled(format!(" {} ", slot.content), slot.style));
        }
        Line::from(spans)
    }
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        buf.set_style(area, self.background_style);
        if area.width == 0 {
            return;
        }

        // Right and center are drawn first so that the left group wins on overlap
        Paragraph::new(self.group_line(SlotAlignment::Right))
            .alignment(Alignment::Right)
            .render(area, buf);
        Paragraph::new(self.group_line(SlotAlignment::Center))
            .alignment(Alignment::Center)
            .render(area, buf);

        let left = self.group_line(SlotAlignment::Left);
        let left_width = (left.width() as u16).min(area.width);
        Paragraph::new(left).render(
            Rect {
                width: left_width,
                ..area
            },
            buf,
        );
    }
}
