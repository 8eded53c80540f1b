//! Turns navigator screens into embeds and action rows.
use crate::catalog::Product;
use crate::constants::{BUTTONS_PER_ROW, CURRENCY_SYMBOL, MAX_ACTION_ROWS};
use crate::interactions::ids::NavToken;
use crate::navigation::{CheckoutLink, ClubMenu, ProductPage, Screen, VariantMenu};
use crate::ui::buttons::{Btn, button_rows};
use crate::ui::style::{
    COLOR_CATALOG, COLOR_CHECKOUT, COLOR_HIGHLIGHT, COLOR_VARIANT, EMOJI_NEXT, EMOJI_PREV,
    clamp_chars, error_embed,
};
use serenity::builder::{CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter};
use serenity::model::application::ButtonStyle;
use url::Url;

pub const NO_RESULTS: &str = "❌ No in-stock items found";

/// A full message body: embeds plus component rows.
pub struct View {
    pub embeds: Vec<CreateEmbed>,
    pub components: Vec<CreateActionRow>,
}

impl View {
    pub fn notice(title: &str, text: &str) -> Self {
        Self {
            embeds: vec![error_embed(title, text)],
            components: Vec::new(),
        }
    }
}

pub fn render(screen: &Screen) -> View {
    match screen {
        Screen::ClubMenu(menu) => club_menu_view(menu),
        Screen::ProductPage(page) => product_page_view(page),
        Screen::VariantMenu(menu) => variant_menu_view(menu),
        Screen::CheckoutLink(link) => checkout_view(link),
    }
}

/// Caption block shared by product cards and highlights.
pub fn caption(p: &Product) -> String {
    let club = if p.club.trim().is_empty() {
        "—"
    } else {
        p.club.as_str()
    };
    format!(
        "🏷 Club: {club}\n💰 Price: {CURRENCY_SYMBOL}{price}\n📏 Sizes: {sizes}",
        price = p.price,
        sizes = p.sizes_label()
    )
}

fn valid_url(raw: &str) -> Option<&str> {
    Url::parse(raw)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .map(|_| raw)
}

/// Product card. Image and link are only attached when they parse as web URLs, since Discord
/// rejects the whole message over a single malformed embed URL.
pub fn product_embed(p: &Product, color: u32) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(clamp_chars(&format!("📦 {}", p.title), 256))
        .description(caption(p))
        .color(color);
    if let Some(img) = valid_url(&p.image) {
        embed = embed.image(img);
    }
    if let Some(link) = valid_url(&p.link) {
        embed = embed.url(link);
    }
    embed
}

fn nav_row(prev: Option<NavToken>, next: Option<NavToken>) -> Option<CreateActionRow> {
    let buttons: Vec<CreateButton> = [
        prev.and_then(|t| Btn::nav(&t, &format!("{EMOJI_PREV} Prev"), ButtonStyle::Secondary)),
        next.and_then(|t| Btn::nav(&t, &format!("Next {EMOJI_NEXT}"), ButtonStyle::Secondary)),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!buttons.is_empty()).then(|| CreateActionRow::Buttons(buttons))
}

pub fn club_menu_view(menu: &ClubMenu) -> View {
    let page = &menu.page;
    if page.is_empty() {
        return View::notice("🏟 Browse by club", "No clubs are listed right now.");
    }
    let embed = CreateEmbed::new()
        .title("🏟 Browse by club")
        .description(format!("Pick a club to see what is in stock.\n{} clubs", page.total))
        .footer(CreateEmbedFooter::new(page.label()))
        .color(COLOR_CATALOG);

    let buttons = page
        .items
        .iter()
        .filter_map(|club| {
            Btn::nav(&NavToken::club_page(club, 0), club, ButtonStyle::Primary)
        })
        .collect();
    let mut components = button_rows(buttons, BUTTONS_PER_ROW, MAX_ACTION_ROWS - 1);
    let prev = page.has_prev().then(|| NavToken::ClubMenu {
        page: page.index - 1,
    });
    let next = page.has_next().then(|| NavToken::ClubMenu {
        page: page.index + 1,
    });
    components.extend(nav_row(prev, next));
    View {
        embeds: vec![embed],
        components,
    }
}

pub fn product_page_view(view: &ProductPage) -> View {
    let page = &view.page;
    if page.is_empty() {
        return View {
            embeds: vec![
                CreateEmbed::new()
                    .title(view.basis.heading())
                    .description(NO_RESULTS)
                    .color(COLOR_CATALOG),
            ],
            components: Vec::new(),
        };
    }

    let last = page.items.len() - 1;
    let embeds = page
        .items
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let embed = product_embed(p, COLOR_CATALOG);
            if i == last {
                embed.footer(CreateEmbedFooter::new(format!(
                    "{} · {} · {} items",
                    view.basis.heading(),
                    page.label(),
                    page.total
                )))
            } else {
                embed
            }
        })
        .collect();

    let select: Vec<CreateButton> = page
        .items
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let token = NavToken::Select {
                product_id: p.id.clone(),
            };
            Btn::nav(&token, &format!("Select {}", i + 1), ButtonStyle::Success)
        })
        .collect();
    let mut components = button_rows(select, BUTTONS_PER_ROW, 1);
    components.extend(nav_row(view.prev_token(), view.next_token()));
    View { embeds, components }
}

pub fn variant_menu_view(menu: &VariantMenu) -> View {
    let mut embed = product_embed(&menu.product, COLOR_VARIANT);
    if menu.choices.is_empty() {
        embed = embed.field("Sizes", "No sizes are available to order.", false);
        return View {
            embeds: vec![embed],
            components: Vec::new(),
        };
    }
    embed = embed.field("Choose a size", "Tap a size to get your checkout link.", false);
    let buttons = menu
        .tokens()
        .into_iter()
        .filter_map(|(size, token)| Btn::nav(&token, &size, ButtonStyle::Primary))
        .collect();
    View {
        embeds: vec![embed],
        components: button_rows(buttons, BUTTONS_PER_ROW, MAX_ACTION_ROWS),
    }
}

pub fn checkout_view(link: &CheckoutLink) -> View {
    let embed = CreateEmbed::new()
        .title("🛒 Ready to check out")
        .description(format!("🔗 {}", link.url))
        .color(COLOR_CHECKOUT);
    View {
        embeds: vec![embed],
        components: vec![CreateActionRow::Buttons(vec![Btn::link(
            link.url.as_str(),
            "Checkout",
        )])],
    }
}

pub fn highlight_embed(p: &Product) -> CreateEmbed {
    product_embed(p, COLOR_HIGHLIGHT)
}
