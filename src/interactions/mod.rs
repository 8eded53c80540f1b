//! This module acts as a central router for all component interactions.
//!
//! The main `handler.rs` file delegates here based on the component's "family" (the first
//! `:`-separated segment of its custom id).

pub mod ids;
pub mod shop_handler;
pub mod util;
