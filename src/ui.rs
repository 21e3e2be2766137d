use crate::app::Mode;
use crate::form::TextForm;
use crate::input::coordinates::screen_layout;
use crate::widgets::cursor::CursorSupport;
use crate::widgets::item_list::{add_button_rect, list_block};
use crate::widgets::{AddButton, AddItemDialog, ItemList, ToastWidget};
use crate::App;
use ratatui::prelude::*;

impl App {
    /// Main render function for the application UI
    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        let layout = screen_layout(area, self.config.ui.show_status_bar);

        f.render_widget(
            AddButton::new().focused(self.mode == Mode::Browse),
            add_button_rect(layout.header),
        );

        self.render_list(f, layout.list, layout.list_inner);

        if let Some(status_area) = layout.status {
            self.update_status_bar();
            f.render_widget(self.status_bar.clone(), status_area);
        }

        self.toast_manager.update();
        if self.toast_manager.has_active_toasts() {
            f.render_widget(ToastWidget::new(&self.toast_manager), area);
        }

        if self.mode == Mode::AddDialog {
            self.render_add_dialog(f, area);
        }
    }

    /// Render the bordered list and, while editing, place the cursor in the editor row
    fn render_list(&mut self, f: &mut Frame, list_area: Rect, inner: Rect) {
        self.ensure_selection_visible(inner.height as usize);

        f.render_widget(list_block(self.mode != Mode::AddDialog), list_area);

        let list = ItemList::new(self.store.items())
            .selected(self.selected)
            .scroll_offset(self.scroll_offset)
            .draft(self.edit_draft.as_ref())
            .show_ids(self.config.list.show_ids);

        let cursor = match (&self.edit_draft, self.mode) {
            (Some(draft), Mode::Editing) => self.store.index_of(draft.id).map(|index| {
                list.calculate_cursor_position((draft.focused_text().chars().count(), index), inner)
            }),
            _ => None,
        };

        f.render_widget(list, inner);

        if let Some(position) = cursor {
            f.set_cursor_position(position);
        }
    }

    /// Render the add dialog over everything else
    fn render_add_dialog(&self, f: &mut Frame, area: Rect) {
        let dialog = AddItemDialog::new(&self.add_form);
        let cursor = dialog.calculate_cursor_position(
            (self.add_form.focused_text().chars().count(), 0),
            area,
        );

        f.render_widget(dialog, area);
        f.set_cursor_position(cursor);
    }
}
