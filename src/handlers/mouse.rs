/// Mouse input handlers that subscribe to mouse events
use crate::app::{App, Mode};
use crate::events::{AppEvent, EventBus, EventKind};
use crate::input::coordinates::{screen_to_hit, terminal_area, ScreenHit};
use crate::widgets::{RowAction, ToastType};
use anyhow::Result;
use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::RwLock;

/// Rows moved per wheel notch
const SCROLL_STEP: i16 = 1;

/// Mouse handler: the clickable parts of the list and the add button
#[derive(Clone)]
pub struct MouseHandler {
    app_state: Arc<RwLock<App>>,
    event_sender: mpsc::UnboundedSender<AppEvent>,
}

impl MouseHandler {
    pub fn new(app_state: Arc<RwLock<App>>, event_sender: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            app_state,
            event_sender,
        }
    }

    /// Subscribe to mouse events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        let handler = self.clone();

        event_bus
            .subscribe(EventKind::MouseInput, move |event| {
                let handler = handler.clone();
                async move { handler.handle_mouse_event(event).await }
            })
            .await;

        Ok(())
    }

    async fn handle_mouse_event(&self, event: AppEvent) -> Result<()> {
        if let AppEvent::MouseInput(mouse) = event {
            self.handle_mouse(mouse, terminal_area()).await?;
        }

        Ok(())
    }

    /// Handle a mouse event against a screen of the given size
    pub async fn handle_mouse(&self, mouse: MouseEvent, screen: Rect) -> Result<()> {
        let mode = self.app_state.read().await.mode;

        match (mode, mouse.kind) {
            (Mode::Browse, MouseEventKind::Down(MouseButton::Left)) => {
                self.handle_browse_click(mouse.column, mouse.row, screen).await?;
            }
            (Mode::Browse, MouseEventKind::ScrollUp) => {
                self.app_state.write().await.handle_mouse_scroll(-SCROLL_STEP);
            }
            (Mode::Browse, MouseEventKind::ScrollDown) => {
                self.app_state.write().await.handle_mouse_scroll(SCROLL_STEP);
            }
            (Mode::Editing, MouseEventKind::Down(MouseButton::Left)) => {
                self.handle_editing_click(mouse.column, mouse.row, screen).await?;
            }
            _ => {}
        }

        Ok(())
    }

    async fn handle_browse_click(&self, x: u16, y: u16, screen: Rect) -> Result<()> {
        let mut app = self.app_state.write().await;

        match screen_to_hit(&app, screen, x, y) {
            Some(ScreenHit::AddButton) => {
                app.open_add_dialog();
            }
            Some(ScreenHit::Row { index, action }) => {
                app.select_index(index);
                match action {
                    RowAction::Edit => {
                        app.begin_edit_selected();
                    }
                    RowAction::Delete => {
                        if let Some(item) = app.delete_selected() {
                            drop(app);
                            self.event_sender.send(AppEvent::toast(
                                format!("Deleted {}", item.name),
                                ToastType::Info,
                            ))?;
                        }
                    }
                    RowAction::Select | RowAction::Save => {}
                }
            }
            None => {}
        }

        Ok(())
    }

    /// Only the save label of the editing row reacts while editing
    async fn handle_editing_click(&self, x: u16, y: u16, screen: Rect) -> Result<()> {
        let mut app = self.app_state.write().await;

        if let Some(ScreenHit::Row {
            action: RowAction::Save,
            ..
        }) = screen_to_hit(&app, screen, x, y)
        {
            if let Some(item) = app.commit_edit() {
                drop(app);
                self.event_sender.send(AppEvent::toast(
                    format!("Saved {} (qty {})", item.name, item.quantity),
                    ToastType::Success,
                ))?;
            }
        }

        Ok(())
    }
}
