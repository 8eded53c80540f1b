//! Button builders: navigation tokens, outbound links and row packing.
use crate::interactions::ids::NavToken;
use crate::ui::style::clamp_label;
use serenity::builder::{CreateActionRow, CreateButton};
use serenity::model::application::ButtonStyle;

pub struct Btn;
impl Btn {
    /// Outbound URL button; Discord opens it without sending an interaction.
    pub fn link(url: &str, label: &str) -> CreateButton {
        CreateButton::new_link(url).label(clamp_label(label))
    }

    /// Button carrying a navigation token, or `None` if the token is too long for a custom id.
    pub fn nav(token: &NavToken, label: &str, style: ButtonStyle) -> Option<CreateButton> {
        match token.encode_checked() {
            Some(id) => Some(
                CreateButton::new(id)
                    .label(clamp_label(label))
                    .style(style),
            ),
            None => {
                tracing::warn!(target = "ui.button", label, "token exceeds custom id limit; button omitted");
                None
            }
        }
    }
}

/// Pack buttons into action rows of `per_row`, keeping at most `max_rows` rows.
pub fn button_rows(
    buttons: Vec<CreateButton>,
    per_row: usize,
    max_rows: usize,
) -> Vec<CreateActionRow> {
    let mut rows = Vec::new();
    let mut iter = buttons.into_iter().peekable();
    while iter.peek().is_some() && rows.len() < max_rows {
        let row: Vec<CreateButton> = iter.by_ref().take(per_row).collect();
        rows.push(CreateActionRow::Buttons(row));
    }
    rows
}
