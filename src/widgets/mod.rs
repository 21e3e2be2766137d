pub mod cursor;
pub mod item_list;
pub mod modal;
pub mod status_bar;
pub mod toast;

pub use cursor::CursorSupport;
pub use item_list::{AddButton, ItemList, RowAction, RowLayout};
pub use modal::{AddItemDialog, Modal};
pub use status_bar::{SlotAlignment, StatusBar, StatusSlot};
pub use toast::{Toast, ToastManager, ToastType, ToastWidget};
