use crate::events::{AppEvent, EventBus};
use anyhow::{Context, Result};
use ratatui::crossterm::event::{KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// Turns raw terminal input into events on the bus
pub struct InputSystem {
    event_bus: EventBus,
}

impl InputSystem {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }

    /// Publish a key press; releases and repeats are dropped
    pub fn handle_key_input(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        self.event_bus
            .publish(AppEvent::KeyInput(key))
            .context("Failed to publish key input event")
    }

    /// Publish a mouse event
    pub fn handle_mouse_input(&self, mouse: MouseEvent) -> Result<()> {
        self.event_bus
            .publish(AppEvent::MouseInput(mouse))
            .context("Failed to publish mouse input event")
    }

    /// Get the event bus sender for direct event publishing
    pub fn event_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_bus.sender()
    }
}
