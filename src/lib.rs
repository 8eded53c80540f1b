// Library entry so integration tests and external tools can reference internal modules.
// Re-export the same modules used by the binary (`main.rs`).
pub mod catalog;
pub mod commands;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod handler;
pub mod interactions;
pub mod model;
pub mod navigation;
pub mod picker;
pub mod scheduler;
pub mod services;
pub mod ui;

pub use error::{ShopError, ShopResult};
pub use model::AppState;
