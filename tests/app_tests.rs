//! Integration tests for the application state and core functionality
//!
//! Tests the App struct: the add dialog, inline editing, deletion and selection

use std::fs;
use tempfile::TempDir;

use shoplist::config::{Config, CONFIG_FILE_NAME};
use shoplist::{App, Mode};

fn test_app() -> App {
    App::with_config(".".into(), Config::default())
}

fn add(app: &mut App, name: &str, quantity: &str) {
    app.open_add_dialog();
    app.add_form.name = name.to_string();
    app.add_form.quantity = quantity.to_string();
    app.submit_add_dialog().unwrap();
}

#[tokio::test]
async fn test_app_creation() {
    let temp_dir = TempDir::new().unwrap();
    let app = App::with_user_dir(temp_dir.path()).await;

    assert!(app.running);
    assert!(app.store.is_empty());
    assert_eq!(app.mode, Mode::Browse);
    assert!(app.edit_draft.is_none());
    assert!(app.selected.is_none());
    assert_eq!(app.scroll_offset, 0);
    assert!(app.status_message.is_none());
    assert_eq!(app.config, Config::default());

    // Test that status bar is initialized with default slots
    assert!(app.status_bar.slot_count() > 0);
}

#[tokio::test]
async fn test_app_loads_user_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        r#"{ "ui": { "show_status_bar": false }, "list": { "show_ids": true } }"#,
    )
    .unwrap();

    let app = App::with_user_dir(temp_dir.path()).await;

    assert!(!app.config.ui.show_status_bar);
    assert!(app.config.list.show_ids);
    assert_eq!(app.user_dir, temp_dir.path());
}

#[tokio::test]
async fn test_app_creates_missing_user_dir() {
    let temp_dir = TempDir::new().unwrap();
    let user_dir = temp_dir.path().join("nested").join("shoplist");

    let app = App::with_user_dir(&user_dir).await;

    assert!(user_dir.is_dir());
    assert_eq!(app.config, Config::default());
}

#[tokio::test]
async fn test_app_falls_back_on_broken_config() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "{ not json").unwrap();

    let app = App::with_user_dir(temp_dir.path()).await;

    assert!(app.running);
    assert_eq!(app.config, Config::default());
}

#[test]
fn test_add_dialog_flow() {
    let mut app = test_app();

    app.open_add_dialog();
    assert_eq!(app.mode, Mode::AddDialog);
    assert_eq!(app.add_form.quantity, "1");

    app.add_form.name = "Milk".to_string();
    app.add_form.quantity = "3".to_string();
    let item = app.submit_add_dialog().unwrap();

    assert_eq!(item.name, "Milk");
    assert_eq!(item.quantity, 3);
    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.selected, Some(0));
    assert!(app.add_form.name.is_empty());
    assert_eq!(app.add_form.quantity, "1");
}

#[test]
fn test_add_dialog_blank_name_stays_open() {
    let mut app = test_app();

    app.open_add_dialog();
    app.add_form.name = "   ".to_string();
    app.add_form.quantity = "4".to_string();

    assert!(app.submit_add_dialog().is_none());
    assert_eq!(app.mode, Mode::AddDialog);
    assert_eq!(app.add_form.name, "   ");
    assert_eq!(app.add_form.quantity, "4");
    assert!(app.store.is_empty());
}

#[test]
fn test_add_dialog_cancel_discards_input() {
    let mut app = test_app();

    app.open_add_dialog();
    app.add_form.name = "Eggs".to_string();
    app.cancel_add_dialog();

    assert_eq!(app.mode, Mode::Browse);
    assert!(app.add_form.name.is_empty());
    assert!(app.store.is_empty());
}

#[test]
fn test_add_dialog_refused_while_editing() {
    let mut app = test_app();
    add(&mut app, "Milk", "1");
    let milk = app.store.items()[0].id;
    app.begin_edit(milk);

    assert!(!app.open_add_dialog());
    assert_eq!(app.mode, Mode::Editing);
    assert_eq!(app.store.editing(), Some(milk));

    app.cancel_edit();
    assert!(app.open_add_dialog());
    assert_eq!(app.mode, Mode::AddDialog);
}

#[test]
fn test_edit_flow() {
    let mut app = test_app();
    add(&mut app, "Milk", "1");
    add(&mut app, "Eggs", "6");
    app.select_index(1);

    assert!(app.begin_edit_selected());
    assert_eq!(app.mode, Mode::Editing);

    let draft = app.edit_draft.as_mut().unwrap();
    assert_eq!(draft.name, "Eggs");
    assert_eq!(draft.quantity, "6");
    draft.name = "Brown eggs".to_string();
    draft.quantity = "12".to_string();

    let item = app.commit_edit().unwrap();
    assert_eq!(item.name, "Brown eggs");
    assert_eq!(item.quantity, 12);
    assert_eq!(app.mode, Mode::Browse);
    assert!(app.edit_draft.is_none());
    assert!(app.store.items().iter().all(|i| !i.is_editing));
}

#[test]
fn test_cancel_edit_discards_draft() {
    let mut app = test_app();
    add(&mut app, "Milk", "2");
    let milk = app.store.items()[0].id;

    app.begin_edit(milk);
    app.edit_draft.as_mut().unwrap().name = "Cream".to_string();
    app.cancel_edit();

    assert_eq!(app.mode, Mode::Browse);
    assert!(app.edit_draft.is_none());
    assert_eq!(app.store.get(milk).unwrap().name, "Milk");
    assert!(app.store.editing().is_none());
}

#[test]
fn test_begin_edit_switches_items() {
    let mut app = test_app();
    add(&mut app, "Milk", "1");
    add(&mut app, "Eggs", "1");
    let milk = app.store.items()[0].id;
    let eggs = app.store.items()[1].id;

    app.begin_edit(milk);
    app.edit_draft.as_mut().unwrap().name = "unsaved".to_string();
    app.begin_edit(eggs);

    assert_eq!(app.store.editing(), Some(eggs));
    assert_eq!(app.edit_draft.as_ref().unwrap().id, eggs);
    assert_eq!(app.store.get(milk).unwrap().name, "Milk");
    assert_eq!(app.selected, Some(1));
}

#[test]
fn test_begin_edit_without_selection() {
    let mut app = test_app();

    assert!(!app.begin_edit_selected());
    assert_eq!(app.mode, Mode::Browse);
}

#[test]
fn test_delete_editing_item_leaves_edit_mode() {
    let mut app = test_app();
    add(&mut app, "Milk", "1");
    let milk = app.store.items()[0].id;
    app.begin_edit(milk);

    let removed = app.delete(milk).unwrap();

    assert_eq!(removed.name, "Milk");
    assert_eq!(app.mode, Mode::Browse);
    assert!(app.edit_draft.is_none());
    assert!(app.selected.is_none());
}

#[test]
fn test_delete_selected_clamps_selection() {
    let mut app = test_app();
    add(&mut app, "Milk", "1");
    add(&mut app, "Eggs", "1");
    add(&mut app, "Bread", "1");
    app.select_last();

    app.delete_selected().unwrap();
    assert_eq!(app.selected, Some(1));

    app.delete_selected().unwrap();
    app.delete_selected().unwrap();
    assert!(app.selected.is_none());
    assert!(app.delete_selected().is_none());
}

#[test]
fn test_selection_movement() {
    let mut app = test_app();
    app.select_next();
    assert!(app.selected.is_none());

    add(&mut app, "Milk", "1");
    add(&mut app, "Eggs", "1");
    add(&mut app, "Bread", "1");

    app.select_first();
    assert_eq!(app.selected, Some(0));
    app.select_previous();
    assert_eq!(app.selected, Some(0));
    app.select_next();
    app.select_next();
    app.select_next();
    assert_eq!(app.selected, Some(2));
    assert_eq!(app.selected_item().unwrap().name, "Bread");

    assert!(!app.select_index(3));
    assert_eq!(app.selected, Some(2));
}

#[test]
fn test_mouse_scroll_moves_selection() {
    let mut app = test_app();
    for name in ["a", "b", "c", "d"] {
        add(&mut app, name, "1");
    }
    app.select_first();

    app.handle_mouse_scroll(2);
    assert_eq!(app.selected, Some(2));
    app.handle_mouse_scroll(-5);
    assert_eq!(app.selected, Some(0));
}

#[test]
fn test_ensure_selection_visible() {
    let mut app = test_app();
    app.config.list.scroll_margin = 1;
    for i in 0..20 {
        add(&mut app, &format!("item {}", i), "1");
    }

    app.select_index(10);
    app.ensure_selection_visible(5);
    assert!(app.scroll_offset <= 10 && 10 < app.scroll_offset + 5);
    assert_eq!(app.scroll_offset, 7);

    app.select_first();
    app.ensure_selection_visible(5);
    assert_eq!(app.scroll_offset, 0);

    app.select_last();
    app.ensure_selection_visible(5);
    assert_eq!(app.scroll_offset, 15);
}

#[test]
fn test_status_bar_reflects_state() {
    let mut app = test_app();
    add(&mut app, "Milk", "1");
    let milk = app.store.items()[0].id;
    app.begin_edit(milk);
    app.set_status_message("hello");

    app.update_status_bar();

    let bar = &app.status_bar;
    assert_eq!(bar.get_slot("items").unwrap().content, "1 item");
    assert_eq!(bar.get_slot("selection").unwrap().content, "Item 1/1");
    assert_eq!(bar.get_slot("editing").unwrap().content, "Editing: Milk");
    assert!(bar.get_slot("editing").unwrap().visible);
    assert_eq!(bar.get_slot("message").unwrap().content, "hello");
    assert_eq!(bar.get_slot("mode").unwrap().content, "EDIT");

    app.cancel_edit();
    app.clear_status_message();
    app.update_status_bar();
    assert!(!app.status_bar.get_slot("editing").unwrap().visible);
    assert!(!app.status_bar.get_slot("message").unwrap().visible);
}

#[test]
fn test_status_message_cleared_by_next_action() {
    let mut app = test_app();

    app.set_status_message("No item selected");
    assert!(!app.begin_edit_selected());
    assert_eq!(app.status_message.as_deref(), Some("No item selected"));

    add(&mut app, "Milk", "1");
    assert!(app.status_message.is_none());

    app.set_status_message("No item selected");
    app.select_first();
    app.update_status_bar();
    assert!(app.status_message.is_none());
    assert!(!app.status_bar.get_slot("message").unwrap().visible);

    app.set_status_message("No item selected");
    assert!(app.begin_edit_selected());
    assert!(app.status_message.is_none());
}
