//! Terminal shopping list: an in-memory item store with a ratatui front end

pub mod app;
pub mod config;
pub mod events;
pub mod form;
pub mod handlers;
pub mod input;
pub mod input_system;
pub mod logging;
pub mod store;
pub mod ui;
pub mod widgets;

// Re-export main types for convenience
pub use app::{App, Mode};
pub use store::{Item, ItemId, ItemStore};
