use ratatui::{
    buffer::Buffer as TuiBuffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use std::time::{Duration, Instant};

/// Type of toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastType {
    fn color(self) -> Color {
        match self {
            ToastType::Info => Color::Cyan,
            ToastType::Success => Color::Green,
            ToastType::Warning => Color::Yellow,
            ToastType::Error => Color::Red,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            ToastType::Info => "ℹ",
            ToastType::Success => "✓",
            ToastType::Warning => "⚠",
            ToastType::Error => "✗",
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub toast_type: ToastType,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration: Duration::from_secs(3),
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.duration
    }

    /// 0.0 = just created, 1.0 = expired
    pub fn progress(&self) -> f32 {
        let total = self.duration.as_secs_f32();
        if total <= 0.0 {
            return 1.0;
        }
        (self.created_at.elapsed().as_secs_f32() / total).min(1.0)
    }
}

/// Queue of live toasts, drawn stacked in the top-right corner
#[derive(Debug)]
pub struct ToastManager {
    toasts: Vec<Toast>,
    max_toasts: usize,
    duration: Duration,
    enabled: bool,
}

impl ToastManager {
    pub fn new() -> Self {
        Self {
            toasts: Vec::new(),
            max_toasts: 5,
            duration: Duration::from_secs(3),
            enabled: true,
        }
    }

    /// Lifetime given to toasts added through this manager
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// A disabled manager drops every toast it is given
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn add_toast(&mut self, toast: Toast) {
        if !self.enabled {
            return;
        }

        self.toasts.push(toast.with_duration(self.duration));
        if self.toasts.len() > self.max_toasts {
            let overflow = self.toasts.len() - self.max_toasts;
            self.toasts.drain(..overflow);
        }
    }

    pub fn add_info(&mut self, message: impl Into<String>) {
        self.add_toast(Toast::new(message, ToastType::Info));
    }

    pub fn add_success(&mut self, message: impl Into<String>) {
        self.add_toast(Toast::new(message, ToastType::Success));
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.add_toast(Toast::new(message, ToastType::Warning));
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.add_toast(Toast::new(message, ToastType::Error));
    }

    /// Drop expired toasts
    pub fn update(&mut self) {
        self.toasts.retain(|toast| !toast.is_expired());
    }

    pub fn has_active_toasts(&self) -> bool {
        !self.toasts.is_empty()
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn render(&self, area: Rect, buf: &mut TuiBuffer) {
        if self.toasts.is_empty() {
            return;
        }

        let toast_width = 40.min(area.width / 2);
        let toast_height = (self.toasts.len() as u16 * 3).min(area.height / 2);
        let origin_x = area.x + area.width.saturating_sub(toast_width + 2);
        let origin_y = area.y + 1;

        for (i, toast) in self.toasts.iter().enumerate() {
            let y_offset = i as u16 * 3;
            if y_offset >= toast_height {
                break;
            }

            let toast_area = Rect {
                x: origin_x,
                y: origin_y + y_offset,
                width: toast_width,
                height: 3.min(toast_height - y_offset),
            };
            render_single_toast(toast, toast_area, buf);
        }
    }
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

fn render_single_toast(toast: &Toast, area: Rect, buf: &mut TuiBuffer) {
    let progress = toast.progress();
    let primary_color = toast.toast_type.color();
    // Border goes gray for the last tenth of the lifetime
    let border_color = if progress > 0.9 {
        Color::DarkGray
    } else {
        primary_color
    };

    Clear.render(area, buf);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(Color::Rgb(30, 30, 30)));
    let inner_area = block.inner(area);
    block.render(area, buf);

    if inner_area.width == 0 || inner_area.height == 0 {
        return;
    }

    let available = (inner_area.width as usize).saturating_sub(2);
    let message = truncate_chars(&toast.message, available);

    let content = Line::from(vec![
        Span::styled(
            format!("{} ", toast.toast_type.icon()),
            Style::default()
                .fg(primary_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(message, Style::default().fg(Color::White)),
    ]);

    Paragraph::new(content).render(
        Rect {
            height: 1,
            ..inner_area
        },
        buf,
    );
}

/// Shorten `text` to `max` characters, ending in "..." when cut
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

/// Widget wrapper for rendering toasts
pub struct ToastWidget<'a> {
    manager: &'a ToastManager,
}

impl<'a> ToastWidget<'a> {
    pub fn new(manager: &'a ToastManager) -> Self {
        Self { manager }
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut TuiBuffer) {
        self.manager.render(area, buf);
    }
}
