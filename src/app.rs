use std::io::Stdout;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::event::{self, Event},
    Terminal,
};
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::{Config, ConfigManager};
use crate::events::{AppEvent, EventBus};
use crate::form::{AddForm, EditDraft};
use crate::handlers::{AppStateHandler, KeyboardHandler, MouseHandler};
use crate::input_system::InputSystem;
use crate::store::{Item, ItemId, ItemStore};
use crate::widgets::{SlotAlignment, StatusBar, StatusSlot, ToastManager};

/// Which part of the screen receives input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Moving through the list
    #[default]
    Browse,

    /// The "Add Shopping Item" dialog is open
    AddDialog,

    /// An item is being edited inline
    Editing,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Browse => "BROWSE",
            Mode::AddDialog => "ADD",
            Mode::Editing => "EDIT",
        }
    }
}

/// Application state shared between the draw loop and the event handlers
pub struct App {
    /// Whether the application is running
    pub running: bool,

    /// The shopping list
    pub store: ItemStore,

    /// Current input mode
    pub mode: Mode,

    /// Text typed into the add dialog
    pub add_form: AddForm,

    /// Unsaved text of the item in edit mode
    pub edit_draft: Option<EditDraft>,

    /// Index of the highlighted row
    pub selected: Option<usize>,

    /// First list row shown on screen
    pub scroll_offset: usize,

    /// Last message shown to the user
    pub status_message: Option<String>,

    /// Directory holding the user's config
    pub user_dir: PathBuf,

    /// Loaded user settings
    pub config: Config,

    /// Toast notification manager
    pub toast_manager: ToastManager,

    /// Status bar with slot-based system
    pub status_bar: StatusBar,
}

impl App {
    /// Create the app with settings from the platform config directory
    pub async fn new() -> Self {
        let user_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shoplist");

        Self::with_user_dir(user_dir).await
    }

    /// Create the app with settings read from `user_dir`
    pub async fn with_user_dir(user_dir: impl Into<PathBuf>) -> Self {
        let user_dir = user_dir.into();

        if !user_dir.exists() {
            if let Err(e) = tokio::fs::create_dir_all(&user_dir).await {
                warn!(dir = %user_dir.display(), error = %e, "could not create user directory");
            }
        }

        let mut config_manager = ConfigManager::new(&user_dir);
        if let Err(e) = config_manager.load() {
            warn!(error = %e, "using default settings");
        }

        Self::with_config(user_dir, config_manager.into_config())
    }

    /// Create the app from already loaded settings
    pub fn with_config(user_dir: PathBuf, config: Config) -> Self {
        let toast_manager = ToastManager::new()
            .with_duration(Duration::from_millis(config.ui.toast_duration_ms))
            .with_enabled(config.ui.show_toasts);

        let mut app = Self {
            running: true,
            store: ItemStore::new(),
            mode: Mode::Browse,
            add_form: AddForm::new(),
            edit_draft: None,
            selected: None,
            scroll_offset: 0,
            status_message: None,
            user_dir,
            config,
            toast_manager,
            status_bar: StatusBar::new(),
        };

        app.init_status_bar();
        app
    }

    /// Run the application until a quit event arrives
    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let frame_duration = Duration::from_millis(self.config.ui.frame_duration_ms.max(1));
        let mut snapshots = self.store.subscribe();

        let app_state = Arc::new(RwLock::new(std::mem::take(self)));

        let event_bus = EventBus::new();
        let input_system = InputSystem::new(event_bus.clone());

        let keyboard_handler = KeyboardHandler::new(app_state.clone(), input_system.event_sender());
        let mouse_handler = MouseHandler::new(app_state.clone(), input_system.event_sender());
        let app_state_handler = AppStateHandler::new(app_state.clone());

        keyboard_handler.subscribe(&event_bus).await?;
        mouse_handler.subscribe(&event_bus).await?;
        app_state_handler.subscribe(&event_bus).await?;

        let event_bus_clone = event_bus.clone();
        let processing = tokio::spawn(async move {
            if let Err(e) = event_bus_clone.start_processing().await {
                error!(error = %e, "event processing stopped");
            }
        });

        // Forward store snapshots onto the bus
        let snapshot_sender = event_bus.sender();
        let forwarding = tokio::spawn(async move {
            while snapshots.changed().await.is_ok() {
                let count = snapshots.borrow_and_update().len();
                if snapshot_sender.send(AppEvent::ItemsChanged { count }).is_err() {
                    break;
                }
            }
        });

        info!("shopping list started");
        let mut last_frame: Option<Instant> = None;

        loop {
            let frame_start = Instant::now();

            {
                let app = app_state.read().await;
                if !app.running {
                    break;
                }
            }

            let due = match last_frame {
                Some(last) => frame_start.duration_since(last) >= frame_duration,
                None => true,
            };
            if due {
                let mut app = app_state.write().await;
                terminal.draw(|f| app.render(f))?;
                drop(app);
                last_frame = Some(frame_start);
            }

            if event::poll(Duration::from_millis(1))? {
                match event::read()? {
                    Event::Key(key) => {
                        if let Err(e) = input_system.handle_key_input(key) {
                            error!(error = %e, "error handling key input");
                        }
                    }
                    Event::Mouse(mouse) => {
                        if let Err(e) = input_system.handle_mouse_input(mouse) {
                            error!(error = %e, "error handling mouse input");
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "terminal resized");
                        last_frame = None;
                    }
                    _ => {}
                }
            } else {
                tokio::time::sleep(Duration::from_millis(1)).await;
            }
        }

        processing.abort();
        forwarding.abort();
        let _ = processing.await;
        let _ = forwarding.await;
        drop(input_system);
        drop(event_bus);
        drop(keyboard_handler);
        drop(mouse_handler);
        drop(app_state_handler);

        match Arc::try_unwrap(app_state) {
            Ok(app_lock) => *self = app_lock.into_inner(),
            Err(app_state) => {
                warn!("app state still shared at shutdown, taking it from the lock");
                *self = std::mem::take(&mut *app_state.write().await);
            }
        }

        info!(items = self.store.len(), "shopping list stopped");
        Ok(())
    }

    /// Show the add dialog with a fresh form.
    ///
    /// Refused while an item is being edited, so an edit is always saved or
    /// cancelled before the next add.
    pub fn open_add_dialog(&mut self) -> bool {
        if self.edit_draft.is_some() {
            return false;
        }

        self.add_form.reset();
        self.mode = Mode::AddDialog;
        self.clear_status_message();
        true
    }

    /// Close the add dialog, discarding its input
    pub fn cancel_add_dialog(&mut self) {
        self.add_form.reset();
        self.mode = Mode::Browse;
    }

    /// Add the dialog's item to the list.
    ///
    /// A blank name leaves the dialog open with its input untouched and
    /// returns `None`.
    pub fn submit_add_dialog(&mut self) -> Option<Item> {
        let item = self
            .store
            .add(&self.add_form.name, &self.add_form.quantity)?;

        self.add_form.reset();
        self.mode = Mode::Browse;
        self.selected = self.store.index_of(item.id);
        self.clear_status_message();
        Some(item)
    }

    /// Put `id` in edit mode, replacing any other edit in progress
    pub fn begin_edit(&mut self, id: ItemId) -> bool {
        if !self.store.begin_edit(id) {
            return false;
        }

        self.edit_draft = self.store.get(id).map(EditDraft::from_item);
        self.selected = self.store.index_of(id);
        self.mode = Mode::Editing;
        self.clear_status_message();
        true
    }

    /// Edit the highlighted item
    pub fn begin_edit_selected(&mut self) -> bool {
        let Some(id) = self.selected_item().map(|item| item.id) else {
            return false;
        };
        self.begin_edit(id)
    }

    /// Save the edit draft into the store
    pub fn commit_edit(&mut self) -> Option<Item> {
        let draft = self.edit_draft.take()?;
        self.mode = Mode::Browse;
        self.clear_status_message();

        if self.store.commit_edit(draft.id, &draft.name, &draft.quantity) {
            self.store.get(draft.id).cloned()
        } else {
            None
        }
    }

    /// Drop the edit draft and leave edit mode
    pub fn cancel_edit(&mut self) {
        if let Some(draft) = self.edit_draft.take() {
            self.store.cancel_edit(draft.id);
        }
        self.mode = Mode::Browse;
        self.clear_status_message();
    }

    /// Remove `id` from the list
    pub fn delete(&mut self, id: ItemId) -> Option<Item> {
        let removed = self.store.delete(id)?;

        if self.edit_draft.as_ref().is_some_and(|draft| draft.id == id) {
            self.edit_draft = None;
            if self.mode == Mode::Editing {
                self.mode = Mode::Browse;
            }
        }

        self.clamp_selection();
        self.clear_status_message();
        Some(removed)
    }

    /// Remove the highlighted item
    pub fn delete_selected(&mut self) -> Option<Item> {
        let id = self.selected_item()?.id;
        self.delete(id)
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected.and_then(|index| self.store.items().get(index))
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.store.len() {
            self.set_selected(Some(index));
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            self.selected = None;
            return;
        }
        self.set_selected(Some(match self.selected {
            Some(index) => (index + 1).min(len - 1),
            None => 0,
        }));
    }

    pub fn select_previous(&mut self) {
        if self.store.is_empty() {
            self.selected = None;
            return;
        }
        self.set_selected(Some(match self.selected {
            Some(index) => index.saturating_sub(1),
            None => 0,
        }));
    }

    pub fn select_first(&mut self) {
        self.set_selected(if self.store.is_empty() { None } else { Some(0) });
    }

    pub fn select_last(&mut self) {
        self.set_selected(self.store.len().checked_sub(1));
    }

    /// Landing on an item dismisses the last status message
    fn set_selected(&mut self, selected: Option<usize>) {
        if selected.is_some() {
            self.clear_status_message();
        }
        self.selected = selected;
    }

    /// Keep the selection pointing at an existing row
    pub fn clamp_selection(&mut self) {
        let len = self.store.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(index) => Some(index.min(len - 1)),
            None => None,
        };
        self.scroll_offset = self.scroll_offset.min(len.saturating_sub(1));
    }

    /// Set a status message
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Initialize the status bar with default slots
    pub fn init_status_bar(&mut self) {
        use ratatui::style::{Color, Style};

        let base = Style::default().fg(Color::White).bg(Color::Blue);

        self.status_bar.set_slot(
            StatusSlot::new("items", "")
                .with_alignment(SlotAlignment::Left)
                .with_priority(100)
                .with_style(base),
        );
        self.status_bar.set_slot(
            StatusSlot::new("selection", "")
                .with_alignment(SlotAlignment::Left)
                .with_priority(90)
                .with_style(base)
                .with_visibility(false),
        );
        self.status_bar.set_slot(
            StatusSlot::new("editing", "")
                .with_alignment(SlotAlignment::Center)
                .with_priority(70)
                .with_style(Style::default().fg(Color::Black).bg(Color::Yellow))
                .with_visibility(false),
        );
        self.status_bar.set_slot(
            StatusSlot::new("message", "")
                .with_alignment(SlotAlignment::Center)
                .with_priority(60)
                .with_style(base)
                .with_visibility(false),
        );
        self.status_bar.set_slot(
            StatusSlot::new("mode", Mode::Browse.label())
                .with_alignment(SlotAlignment::Right)
                .with_priority(100)
                .with_style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        );
    }

    /// Update status bar slots with current application state
    pub fn update_status_bar(&mut self) {
        let count = self.store.len();
        let items_text = match count {
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        };
        self.status_bar.update_slot_content("items", items_text);

        match self.selected {
            Some(index) if count > 0 => {
                self.status_bar
                    .update_slot_content("selection", format!("Item {}/{}", index + 1, count));
                self.status_bar.show_slot("selection");
            }
            _ => self.status_bar.hide_slot("selection"),
        }

        let editing_name = self
            .store
            .editing()
            .and_then(|id| self.store.get(id))
            .map(|item| item.name.clone());
        match editing_name {
            Some(name) => {
                self.status_bar
                    .update_slot_content("editing", format!("Editing: {}", name));
                self.status_bar.show_slot("editing");
            }
            None => self.status_bar.hide_slot("editing"),
        }

        match self.status_message.clone() {
            Some(message) => {
                self.status_bar.update_slot_content("message", message);
                self.status_bar.show_slot("message");
            }
            None => self.status_bar.hide_slot("message"),
        }

        self.status_bar.update_slot_content("mode", self.mode.label());
    }
}

impl Default for App {
    fn default() -> Self {
        Self::with_config(PathBuf::from("."), Config::default())
    }
}
