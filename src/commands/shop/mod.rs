//! The storefront commands: club browsing, keyword search and the highlights broadcast.
pub mod run;
pub mod ui;
