pub mod console;
pub mod menu;
pub mod render;

pub use console::{Console, SessionEnd};
pub use menu::MenuChoice;
