// Library target: the trainer core plus the terminal front end. The binary in
// main.rs only wires up the terminal, logging, and key dispatch.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod config;
pub mod deck;
pub mod engine;
pub mod event;
pub mod logging;
pub mod session;
pub mod ui;
