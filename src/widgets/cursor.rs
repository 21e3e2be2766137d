use ratatui::prelude::{Position, Rect};

/// Helper trait for widgets that own a text field and need the terminal cursor
pub trait CursorSupport {
    /// Calculate the cursor position within the widget based on logical position
    fn calculate_cursor_position(&self, logical_pos: (usize, usize), area: Rect) -> Position;

    /// Get the cursor context identifier for this widget
    fn get_cursor_context(&self) -> &str;
}

/// Column `cells` to the right of `x`, saturating at the terminal edge
pub fn advance(x: u16, cells: usize) -> u16 {
    x.saturating_add(u16::try_from(cells).unwrap_or(u16::MAX))
}

/// Clamp a cursor position into `area`
pub fn clamp_to_area(position: Position, area: Rect) -> Position {
    let max_x = area.x + area.width.saturating_sub(1);
    let max_y = area.y + area.height.saturating_sub(1);
    Position::new(position.x.clamp(area.x, max_x), position.y.clamp(area.y, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_saturates() {
        assert_eq!(advance(3, 4), 7);
        assert_eq!(advance(10, usize::MAX), u16::MAX);
        assert_eq!(advance(u16::MAX - 1, 70_000), u16::MAX);
    }
}
