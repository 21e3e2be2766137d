use anyhow::{anyhow, Result};
use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::{error, trace};

use crate::widgets::ToastType;

/// All possible events in the application
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input events
    KeyInput(KeyEvent),

    /// Mouse input events
    MouseInput(MouseEvent),

    /// The store published a new snapshot
    ItemsChanged { count: usize },

    /// UI events
    StatusMessage {
        message: Arc<str>,
        toast_type: ToastType,
    },
    ToastMessage {
        message: Arc<str>,
        toast_type: ToastType,
    },
    ToggleStatusBar,

    /// Application lifecycle
    Quit,
}

/// Subscription key for [`EventBus`]: one per [`AppEvent`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyInput,
    MouseInput,
    ItemsChanged,
    StatusMessage,
    ToastMessage,
    ToggleStatusBar,
    Quit,
}

impl AppEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            AppEvent::KeyInput(_) => EventKind::KeyInput,
            AppEvent::MouseInput(_) => EventKind::MouseInput,
            AppEvent::ItemsChanged { .. } => EventKind::ItemsChanged,
            AppEvent::StatusMessage { .. } => EventKind::StatusMessage,
            AppEvent::ToastMessage { .. } => EventKind::ToastMessage,
            AppEvent::ToggleStatusBar => EventKind::ToggleStatusBar,
            AppEvent::Quit => EventKind::Quit,
        }
    }

    /// A status bar message, mirrored as a toast of `toast_type`
    pub fn status(message: impl Into<Arc<str>>, toast_type: ToastType) -> Self {
        AppEvent::StatusMessage {
            message: message.into(),
            toast_type,
        }
    }

    pub fn toast(message: impl Into<Arc<str>>, toast_type: ToastType) -> Self {
        AppEvent::ToastMessage {
            message: message.into(),
            toast_type,
        }
    }
}

type HandlerFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// Async event handler function type
pub type EventHandler = Arc<dyn Fn(AppEvent) -> HandlerFuture + Send + Sync>;

/// Routes events from an unbounded channel to the handlers subscribed to their kind
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<RwLock<HashMap<EventKind, Vec<EventHandler>>>>,
    sender: mpsc::UnboundedSender<AppEvent>,
    /// Taken by the first call to [`EventBus::start_processing`]
    receiver: Arc<Mutex<Option<mpsc::UnboundedReceiver<AppEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
            sender,
            receiver: Arc::new(Mutex::new(Some(receiver))),
        }
    }

    /// Get a sender for publishing events
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.sender.clone()
    }

    /// Register `handler` for every event of `kind`
    pub async fn subscribe<F, Fut>(&self, kind: EventKind, handler: F)
    where
        F: Fn(AppEvent) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.handlers
            .write()
            .await
            .entry(kind)
            .or_default()
            .push(Arc::new(move |event| Box::pin(handler(event))));
    }

    pub fn publish(&self, event: AppEvent) -> Result<()> {
        self.sender.send(event)?;
        Ok(())
    }

    /// Deliver events until every sender is gone. Runs once per bus.
    pub async fn start_processing(&self) -> Result<()> {
        let mut receiver = self
            .receiver
            .lock()
            .await
            .take()
            .ok_or_else(|| anyhow!("Event processor already started"))?;

        while let Some(event) = receiver.recv().await {
            self.dispatch(event).await;
        }

        Ok(())
    }

    async fn dispatch(&self, event: AppEvent) {
        let kind = event.kind();
        trace!(?kind, "dispatching event");

        // Cloned out so no handler runs while the map is locked
        let handlers: Vec<EventHandler> = self
            .handlers
            .read()
            .await
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        for handler in handlers {
            if let Err(e) = handler(event.clone()).await {
                error!(?kind, error = %e, "event handler failed");
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
