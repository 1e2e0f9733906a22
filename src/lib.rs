pub mod cache;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod gui;
pub mod logging;
pub mod settings;
pub mod sources;
pub mod theme;
