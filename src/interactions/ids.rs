//! Navigation tokens carried in component `custom_id`s.
//!
//! Wire form: `shop:<version>:<tag>:<field>...`, fields separated by `:`. Free-text fields (club
//! names, product and variant ids) are percent-encoded so a `:` inside a club name cannot shift
//! the field positions. Decoding matches the whole field list exhaustively and falls back to
//! [`NavToken::Unrecognized`] for anything it does not understand, including other versions.
//!
//! A club whose encoded name would push the id past [`MAX_CUSTOM_ID_LEN`] travels as a fixed-width
//! digest instead ([`NavToken::ClubDigest`]); the navigator maps it back by hashing the clubs of the
//! current snapshot.
use ahash::RandomState;
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::fmt;
use std::hash::BuildHasher;

pub const SHOP_FAMILY: &str = "shop";
pub const TOKEN_VERSION: &str = "1";
/// Discord rejects custom ids longer than this.
pub const MAX_CUSTOM_ID_LEN: usize = 100;

const FIELD: &AsciiSet = &CONTROLS.add(b':').add(b'%');

const TAG_CLUB_MENU: &str = "clubs";
const TAG_CLUB_PAGE: &str = "club";
const TAG_CLUB_DIGEST: &str = "clubh";
const TAG_SEARCH_PAGE: &str = "kw";
const TAG_SELECT: &str = "sel";
const TAG_VARIANT: &str = "var";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavToken {
    /// A page of the club list itself.
    ClubMenu { page: usize },
    /// Products of one club. Self-contained: the club travels in the token.
    ClubPage { club: String, page: usize },
    /// Same as `ClubPage` for a club name too long to carry verbatim.
    ClubDigest { digest: u64, page: usize },
    /// Keyword results. The keyword lives in the per-chat session store under `session`.
    SearchPage { session: u64, page: usize },
    /// "Select" on a product card.
    Select { product_id: String },
    /// A size button on the variant menu.
    Variant {
        product_id: String,
        variant_id: String,
    },
    Unrecognized,
}

fn enc(field: &str) -> String {
    utf8_percent_encode(field, FIELD).to_string()
}

fn dec(field: &str) -> Option<String> {
    let out = percent_decode_str(field).decode_utf8().ok()?.into_owned();
    (!out.is_empty()).then_some(out)
}

/// Digest of a club name. The seeds are fixed so digests match across restarts of one build.
pub fn club_digest(club: &str) -> u64 {
    let state = RandomState::with_seeds(
        0x5157_4f50_2d43_4c55,
        0x4221_9a3c_77e0_11d5,
        0x0f1e_2d3c_4b5a_6978,
        0x8796_a5b4_c3d2_e1f0,
    );
    BuildHasher::hash_one(&state, club)
}

impl NavToken {
    /// Token for page `page` of `club`: the verbatim form when it fits, the digest form otherwise.
    pub fn club_page(club: &str, page: usize) -> NavToken {
        let verbatim = NavToken::ClubPage {
            club: club.to_string(),
            page,
        };
        if verbatim.encode().len() <= MAX_CUSTOM_ID_LEN {
            verbatim
        } else {
            NavToken::ClubDigest {
                digest: club_digest(club),
                page,
            }
        }
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Encoded form, or `None` when it would exceed Discord's custom id limit.
    pub fn encode_checked(&self) -> Option<String> {
        let s = self.encode();
        (s.len() <= MAX_CUSTOM_ID_LEN).then_some(s)
    }

    pub fn decode(raw: &str) -> NavToken {
        let parts: Vec<&str> = raw.split(':').collect();
        let decoded = match parts.as_slice() {
            [SHOP_FAMILY, TOKEN_VERSION, rest @ ..] => decode_v1(rest),
            _ => None,
        };
        decoded.unwrap_or(NavToken::Unrecognized)
    }
}

fn decode_v1(fields: &[&str]) -> Option<NavToken> {
    match fields {
        [TAG_CLUB_MENU, page] => Some(NavToken::ClubMenu {
            page: page.parse().ok()?,
        }),
        [TAG_CLUB_PAGE, club, page] => Some(NavToken::ClubPage {
            club: dec(club)?,
            page: page.parse().ok()?,
        }),
        [TAG_CLUB_DIGEST, digest, page] => Some(NavToken::ClubDigest {
            digest: u64::from_str_radix(digest, 16).ok()?,
            page: page.parse().ok()?,
        }),
        [TAG_SEARCH_PAGE, session, page] => Some(NavToken::SearchPage {
            session: session.parse().ok()?,
            page: page.parse().ok()?,
        }),
        [TAG_SELECT, product_id] => Some(NavToken::Select {
            product_id: dec(product_id)?,
        }),
        [TAG_VARIANT, product_id, variant_id] => Some(NavToken::Variant {
            product_id: dec(product_id)?,
            variant_id: dec(variant_id)?,
        }),
        _ => None,
    }
}

impl fmt::Display for NavToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SHOP_FAMILY}:{TOKEN_VERSION}:")?;
        match self {
            NavToken::ClubMenu { page } => write!(f, "{TAG_CLUB_MENU}:{page}"),
            NavToken::ClubPage { club, page } => write!(f, "{TAG_CLUB_PAGE}:{}:{page}", enc(club)),
            NavToken::ClubDigest { digest, page } => {
                write!(f, "{TAG_CLUB_DIGEST}:{digest:016x}:{page}")
            }
            NavToken::SearchPage { session, page } => {
                write!(f, "{TAG_SEARCH_PAGE}:{session}:{page}")
            }
            NavToken::Select { product_id } => write!(f, "{TAG_SELECT}:{}", enc(product_id)),
            NavToken::Variant {
                product_id,
                variant_id,
            } => write!(f, "{TAG_VARIANT}:{}:{}", enc(product_id), enc(variant_id)),
            NavToken::Unrecognized => write!(f, "?"),
        }
    }
}

/// True for any custom id in the shop family, whatever its version.
pub fn is_shop_id(id: &str) -> bool {
    id.split(':').next() == Some(SHOP_FAMILY)
}
