//! Integration tests for the widget system
//!
//! Renders the list, dialog and status bar into a test backend and checks the output

use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

use shoplist::config::Config;
use shoplist::form::{AddForm, EditDraft, FormField, TextForm};
use shoplist::store::ItemStore;
use shoplist::widgets::item_list::{ADD_BUTTON_LABEL, DELETE_LABEL, EDIT_LABEL, SAVE_LABEL};
use shoplist::widgets::{
    AddItemDialog, CursorSupport, ItemList, SlotAlignment, StatusBar, StatusSlot,
};
use shoplist::{App, Mode};

fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.y..area.y + area.height)
        .map(|y| {
            (area.x..area.x + area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect()
        })
        .collect()
}

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    buffer_lines(terminal.backend().buffer()).join("\n")
}

fn sample_store() -> ItemStore {
    let mut store = ItemStore::new();
    store.add("Milk", "3").unwrap();
    store.add("Eggs", "12").unwrap();
    store.add("Bread", "1").unwrap();
    store
}

#[test]
fn test_empty_list_shows_hint() {
    let store = ItemStore::new();
    let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();

    terminal
        .draw(|f| f.render_widget(ItemList::new(store.items()), f.area()))
        .unwrap();

    assert!(screen_text(&terminal).contains("No items yet. Press 'a' to add one."));
}

#[test]
fn test_list_rows_render_items() {
    let store = sample_store();
    let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();

    terminal
        .draw(|f| {
            f.render_widget(ItemList::new(store.items()).selected(Some(1)), f.area());
        })
        .unwrap();

    let lines = buffer_lines(terminal.backend().buffer());
    assert!(lines[0].contains("Milk"));
    assert!(lines[0].contains("Qty: 3"));
    assert!(lines[0].contains(EDIT_LABEL));
    assert!(lines[0].contains(DELETE_LABEL));
    assert!(lines[1].contains("Eggs"));
    assert!(lines[1].contains("Qty: 12"));
    assert!(lines[2].contains("Bread"));
}

#[test]
fn test_list_shows_ids_when_enabled() {
    let store = sample_store();
    let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();

    terminal
        .draw(|f| f.render_widget(ItemList::new(store.items()).show_ids(true), f.area()))
        .unwrap();

    let lines = buffer_lines(terminal.backend().buffer());
    assert!(lines[0].contains("#1 Milk"));
    assert!(lines[2].contains("#3 Bread"));
}

#[test]
fn test_list_scroll_offset() {
    let store = sample_store();
    let mut terminal = Terminal::new(TestBackend::new(60, 2)).unwrap();

    terminal
        .draw(|f| f.render_widget(ItemList::new(store.items()).scroll_offset(1), f.area()))
        .unwrap();

    let lines = buffer_lines(terminal.backend().buffer());
    assert!(lines[0].contains("Eggs"));
    assert!(lines[1].contains("Bread"));
    assert!(!screen_text(&terminal).contains("Milk"));
}

#[test]
fn test_editing_row_shows_draft() {
    let mut store = sample_store();
    let eggs = store.items()[1].id;
    store.begin_edit(eggs);

    let mut draft = EditDraft::from_item(store.get(eggs).unwrap());
    draft.name = "Duck eggs".to_string();

    let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
    terminal
        .draw(|f| {
            f.render_widget(ItemList::new(store.items()).draft(Some(&draft)), f.area());
        })
        .unwrap();

    let lines = buffer_lines(terminal.backend().buffer());
    assert!(lines[1].contains("Duck eggs"));
    assert!(lines[1].contains(SAVE_LABEL));
    assert!(!lines[1].contains(EDIT_LABEL));
    assert!(lines[0].contains(EDIT_LABEL));
}

#[test]
fn test_item_list_cursor_position() {
    let mut store = sample_store();
    let milk = store.items()[0].id;
    store.begin_edit(milk);
    let mut draft = EditDraft::from_item(store.get(milk).unwrap());

    let area = Rect::new(1, 2, 60, 5);
    let list = ItemList::new(store.items()).draft(Some(&draft));
    let position = list.calculate_cursor_position((draft.name.len(), 0), area);

    // One space of padding before the name
    assert_eq!(position.x, area.x + 1 + 4);
    assert_eq!(position.y, area.y);
    assert_eq!(list.get_cursor_context(), "item_editor");

    draft.set_focus(FormField::Quantity);
    let list = ItemList::new(store.items()).draft(Some(&draft));
    let position = list.calculate_cursor_position((draft.focused_text().len(), 0), area);
    assert_eq!(position.y, area.y);
    assert!(position.x > area.x + 5);
}

#[test]
fn test_add_dialog_rendering() {
    let mut form = AddForm::new();
    form.name = "Apples".to_string();

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal
        .draw(|f| f.render_widget(AddItemDialog::new(&form), f.area()))
        .unwrap();

    let text = screen_text(&terminal);
    assert!(text.contains("Add Shopping Item"));
    assert!(text.contains("Name"));
    assert!(text.contains("> Apples"));
    assert!(text.contains("Quantity"));
    assert!(text.contains("> 1"));
    assert!(text.contains("Enter: Add"));
}

#[test]
fn test_add_dialog_cursor_follows_focus() {
    let mut form = AddForm::new();
    form.name = "Tea".to_string();
    let area = Rect::new(0, 0, 80, 24);

    let name_pos = AddItemDialog::new(&form).calculate_cursor_position((3, 0), area);
    form.toggle_focus();
    let quantity_pos = AddItemDialog::new(&form).calculate_cursor_position((1, 0), area);

    assert_eq!(quantity_pos.y, name_pos.y + 2);
    assert_eq!(name_pos.x, quantity_pos.x + 2);
}

#[test]
fn test_cursor_stays_in_area_for_very_long_text() {
    let area = Rect::new(0, 0, 80, 24);
    let long_name = "x".repeat(65_533);

    let mut form = AddForm::new();
    form.name = long_name.clone();
    let position = AddItemDialog::new(&form).calculate_cursor_position((65_533, 0), area);
    assert!(position.x < area.right());
    assert!(position.y < area.bottom());

    let mut store = sample_store();
    let milk = store.items()[0].id;
    store.begin_edit(milk);
    let mut draft = EditDraft::from_item(store.get(milk).unwrap());
    draft.name = long_name;
    let list = ItemList::new(store.items()).draft(Some(&draft));
    let position = list.calculate_cursor_position((70_000, 0), area);
    assert_eq!(position.y, area.y);
    assert!(position.x < area.right());
}

#[test]
fn test_app_render_with_very_long_draft() {
    let mut app = App::with_config(".".into(), Config::default());
    app.store.add("Milk", "2").unwrap();
    let milk = app.store.items()[0].id;
    app.begin_edit(milk);
    if let Some(draft) = app.edit_draft.as_mut() {
        draft.name = "x".repeat(65_533);
    }

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    assert!(screen_text(&terminal).contains(SAVE_LABEL));

    app.cancel_edit();
    app.open_add_dialog();
    app.add_form.name = "y".repeat(65_533);
    terminal.draw(|f| app.render(f)).unwrap();
    assert!(screen_text(&terminal).contains("Add Shopping Item"));
}

#[test]
fn test_status_bar_rendering() {
    let mut status_bar = StatusBar::new();
    status_bar.set_slot(
        StatusSlot::new("items", "3 items")
            .with_alignment(SlotAlignment::Left)
            .with_priority(100),
    );
    status_bar.set_slot(
        StatusSlot::new("mode", "BROWSE")
            .with_alignment(SlotAlignment::Right)
            .with_priority(100),
    );
    status_bar.set_slot(
        StatusSlot::new("hidden", "secret")
            .with_alignment(SlotAlignment::Center)
            .with_visibility(false),
    );

    let mut terminal = Terminal::new(TestBackend::new(80, 1)).unwrap();
    terminal
        .draw(|f| f.render_widget(status_bar.clone(), f.area()))
        .unwrap();

    let line = &buffer_lines(terminal.backend().buffer())[0];
    assert!(line.starts_with(" 3 items "));
    assert!(line.trim_end().ends_with("BROWSE"));
    assert!(!line.contains("secret"));
}

#[test]
fn test_status_bar_priority_order() {
    let mut status_bar = StatusBar::new().with_separator("|");
    status_bar.set_slot(StatusSlot::new("low", "Low").with_priority(10));
    status_bar.set_slot(StatusSlot::new("high", "High").with_priority(100));

    let mut terminal = Terminal::new(TestBackend::new(40, 1)).unwrap();
    terminal
        .draw(|f| f.render_widget(status_bar.clone(), f.area()))
        .unwrap();

    assert!(buffer_lines(terminal.backend().buffer())[0].starts_with(" High | Low "));
}

#[test]
fn test_app_render() {
    let mut app = App::with_config(".".into(), Config::default());
    app.store.add("Milk", "2").unwrap();
    app.select_index(0);

    let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();

    let lines = buffer_lines(terminal.backend().buffer());
    assert!(lines[0].contains(ADD_BUTTON_LABEL));
    assert!(lines[1].contains("Shopping List"));
    assert!(lines[2].contains("Milk"));
    assert!(lines[11].contains("1 item"));
    assert!(lines[11].contains("BROWSE"));
}

#[test]
fn test_app_render_without_status_bar() {
    let mut app = App::with_config(".".into(), Config::default());
    app.config.ui.show_status_bar = false;

    let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();

    let lines = buffer_lines(terminal.backend().buffer());
    assert!(!lines[11].contains("BROWSE"));
}

#[test]
fn test_app_render_with_dialog_and_editor() {
    let mut app = App::with_config(".".into(), Config::default());
    app.store.add("Milk", "2").unwrap();
    let milk = app.store.items()[0].id;
    app.begin_edit(milk);

    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    assert!(screen_text(&terminal).contains(SAVE_LABEL));
    assert!(screen_text(&terminal).contains("EDIT"));

    app.commit_edit();
    assert!(app.open_add_dialog());
    assert_eq!(app.mode, Mode::AddDialog);
    terminal.draw(|f| app.render(f)).unwrap();
    assert!(screen_text(&terminal).contains("Add Shopping Item"));
}
