/// UI module exports
pub mod app;
pub mod components;
pub mod download;
pub mod favorites_list;
pub mod import_dialog;
pub mod sidebar;
pub mod toggle_button;
