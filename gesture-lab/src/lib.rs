pub mod app;
pub mod config;
pub mod consts;
pub mod errors;
mod ui;
