//! Terminal front-end for the registration form.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod focus;
pub mod paths;
pub mod terminal;
pub mod text_input;
pub mod view;
