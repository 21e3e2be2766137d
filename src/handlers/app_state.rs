/// Application state handlers that respond to events
use crate::app::App;
use crate::config::ConfigManager;
use crate::events::{AppEvent, EventBus, EventKind};
use crate::widgets::Toast;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Applies app-wide events: messages, settings toggles, snapshots and quit
#[derive(Clone)]
pub struct AppStateHandler {
    app_state: Arc<RwLock<App>>,
}

impl AppStateHandler {
    pub fn new(app_state: Arc<RwLock<App>>) -> Self {
        Self { app_state }
    }

    /// Subscribe to all relevant events
    pub async fn subscribe(&self, event_bus: &EventBus) -> Result<()> {
        for kind in [
            EventKind::StatusMessage,
            EventKind::ToastMessage,
            EventKind::ToggleStatusBar,
            EventKind::ItemsChanged,
            EventKind::Quit,
        ] {
            let handler = self.clone();
            event_bus
                .subscribe(kind, move |event| {
                    let handler = handler.clone();
                    async move { handler.handle_event(event).await }
                })
                .await;
        }

        Ok(())
    }

    /// Apply one event to the shared app state
    pub async fn handle_event(&self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::StatusMessage {
                message,
                toast_type,
            } => {
                let mut app = self.app_state.write().await;
                app.set_status_message(message.to_string());
                app.toast_manager.add_toast(Toast::new(message.to_string(), toast_type));
                Ok(())
            }
            AppEvent::ToastMessage {
                message,
                toast_type,
            } => {
                let mut app = self.app_state.write().await;
                app.toast_manager.add_toast(Toast::new(message.to_string(), toast_type));
                Ok(())
            }
            AppEvent::ToggleStatusBar => self.handle_toggle_status_bar().await,
            AppEvent::ItemsChanged { count } => {
                debug!(count, "items changed");
                self.app_state.write().await.clamp_selection();
                Ok(())
            }
            AppEvent::Quit => {
                self.app_state.write().await.running = false;
                Ok(())
            }
            AppEvent::KeyInput(_) | AppEvent::MouseInput(_) => Ok(()),
        }
    }

    /// Flip the status bar and persist the choice
    async fn handle_toggle_status_bar(&self) -> Result<()> {
        let mut app = self.app_state.write().await;
        let show = !app.config.ui.show_status_bar;
        app.config.ui.show_status_bar = show;

        let mut config_manager = ConfigManager::new(&app.user_dir);
        *config_manager.get_config_mut() = app.config.clone();

        match config_manager.save() {
            Ok(()) => {
                info!(show, "status bar toggled");
                let state = if show { "shown" } else { "hidden" };
                app.toast_manager.add_info(format!("Status bar {}", state));
            }
            Err(e) => {
                warn!(error = %e, "could not save settings");
                app.toast_manager.add_error(format!("Error saving config: {}", e));
            }
        }

        Ok(())
    }
}
