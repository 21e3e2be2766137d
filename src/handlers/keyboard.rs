use crate::app::{App, Mode};
use crate::events::{AppEvent, EventBus, EventKind};
use crate::form::TextForm;
use crate::widgets::ToastType;
use anyhow::Result;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;

/// Keyboard handler that turns key presses into list intents
#[derive(Clone)]
pub struct KeyboardHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl KeyboardHandler {
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    /// Subscribe to keyboard events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = self.clone();

        event_bus
            .subscribe(EventKind::KeyInput, move |event| {
                let handler = handler.clone();
                async move { handler.handle_key_event(event).await }
            })
            .await;

        Ok(())
    }

    /// Dispatch a key event by the current mode
    pub async fn handle_key_event(&self, event: AppEvent) -> Result<()> {
        let AppEvent::KeyInput(key) = event else {
            return Ok(());
        };

        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.event_sender.send(AppEvent::Quit)?;
            return Ok(());
        }

        let mode = self.app_state.read().await.mode;
        match mode {
            Mode::Browse => self.handle_browse_key(key).await,
            Mode::AddDialog => self.handle_add_dialog_key(key).await,
            Mode::Editing => self.handle_editing_key(key).await,
        }
    }

    /// Handle keyboard input while moving through the list
    async fn handle_browse_key(&self, key: KeyEvent) -> Result<()> {
        let mut app = self.app_state.write().await;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                drop(app);
                self.event_sender.send(AppEvent::Quit)?;
            }
            KeyCode::Char('a') | KeyCode::Insert => {
                app.open_add_dialog();
            }
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            KeyCode::Char('e') | KeyCode::Enter => {
                if !app.begin_edit_selected() {
                    drop(app);
                    self.event_sender
                        .send(AppEvent::status("No item selected", ToastType::Warning))?;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(item) = app.delete_selected() {
                    drop(app);
                    self.event_sender.send(AppEvent::toast(
                        format!("Deleted {}", item.name),
                        ToastType::Info,
                    ))?;
                }
            }
            KeyCode::Char('s') => {
                drop(app);
                self.event_sender.send(AppEvent::ToggleStatusBar)?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Handle keyboard input in the add dialog
    async fn handle_add_dialog_key(&self, key: KeyEvent) -> Result<()> {
        let mut app = self.app_state.write().await;

        match key.code {
            KeyCode::Esc => app.cancel_add_dialog(),
            KeyCode::Enter => {
                let added = app.submit_add_dialog();
                drop(app);

                let event = match added {
                    Some(item) => AppEvent::toast(
                        format!("Added {} (qty {})", item.name, item.quantity),
                        ToastType::Success,
                    ),
                    None => AppEvent::toast("Item name cannot be blank", ToastType::Warning),
                };
                self.event_sender.send(event)?;
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                app.add_form.toggle_focus()
            }
            KeyCode::Backspace => app.add_form.pop_char(),
            KeyCode::Char(c) if is_text_input(key.modifiers) => app.add_form.push_char(c),
            _ => {}
        }

        Ok(())
    }

    /// Handle keyboard input in the inline editor
    async fn handle_editing_key(&self, key: KeyEvent) -> Result<()> {
        let mut app = self.app_state.write().await;

        match key.code {
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Enter => {
                if let Some(item) = app.commit_edit() {
                    drop(app);
                    self.event_sender.send(AppEvent::toast(
                        format!("Saved {} (qty {})", item.name, item.quantity),
                        ToastType::Success,
                    ))?;
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                if let Some(draft) = app.edit_draft.as_mut() {
                    draft.toggle_focus();
                }
            }
            KeyCode::Backspace => {
                if let Some(draft) = app.edit_draft.as_mut() {
                    draft.pop_char();
                }
            }
            KeyCode::Char(c) if is_text_input(key.modifiers) => {
                if let Some(draft) = app.edit_draft.as_mut() {
                    draft.push_char(c);
                }
            }
            _ => {}
        }

        Ok(())
    }
}

/// Plain or shifted characters are typed; control/alt chords are not
fn is_text_input(modifiers: KeyModifiers) -> bool {
    !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
