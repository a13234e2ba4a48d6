pub mod dialog;
pub mod menu;
pub mod progress_bar;
