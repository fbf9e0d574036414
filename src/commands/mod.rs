pub mod format;
pub mod inventory;
pub mod render;
