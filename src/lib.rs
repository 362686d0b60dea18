pub mod app;
pub mod capability;
pub mod catalog;
pub mod command;
pub mod config;
pub mod dictionary;
pub mod error;
pub(crate) mod event;
pub mod input;
pub mod logging;
pub mod menu;
pub mod model;
pub mod navigation;
pub mod search;
pub mod ui;
