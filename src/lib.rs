#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod fetch;
pub mod loader;
pub mod local_files;
pub mod logging;
pub mod model;
pub mod render;
pub mod state;
