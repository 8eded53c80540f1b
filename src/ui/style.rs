//! Central UI style constants and helpers.
use crate::constants::MAX_BUTTON_LABEL;
use serenity::builder::CreateEmbed;

pub const COLOR_CATALOG: u32 = 0x3498DB; // Blue
pub const COLOR_VARIANT: u32 = 0x9B59B6; // Purple
pub const COLOR_CHECKOUT: u32 = 0x2ECC71; // Green
pub const COLOR_HIGHLIGHT: u32 = 0xF1C40F; // Gold
pub const COLOR_ALERT: u32 = 0xE74C3C; // Red

pub const EMOJI_PREV: &str = "⬅";
pub const EMOJI_NEXT: &str = "➡";

/// Clamp a label to what Discord accepts on a button, marking the cut with an ellipsis.
pub fn clamp_label(label: &str) -> String {
    clamp_chars(label, MAX_BUTTON_LABEL)
}

pub fn clamp_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Convenience builder for an alert/error-styled embed.
pub fn error_embed<T: Into<String>, U: Into<String>>(title: T, description: U) -> CreateEmbed {
    CreateEmbed::new()
        .title(title)
        .description(description)
        .color(COLOR_ALERT)
}
