//! Shared Discord UI building blocks.
pub mod buttons;
pub mod style;
