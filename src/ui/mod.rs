pub mod answer_input;
pub mod components;
pub mod layout;
pub mod screens;
pub mod theme;
