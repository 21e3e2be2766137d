pub mod coordinates;
pub mod scroll;

pub use coordinates::{screen_layout, screen_to_hit, ScreenHit, ScreenLayout};
