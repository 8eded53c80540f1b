mod common;

use catalog_bot::ShopError;
use catalog_bot::catalog::CatalogSnapshot;
use catalog_bot::interactions::ids::NavToken;
use catalog_bot::navigation::{Basis, Navigator, Screen, SearchSessions};
use common::{ScriptedSource, product, twelve_across_two_clubs};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const CHAT: u64 = 4242;

fn navigator(source: Arc<ScriptedSource>) -> Navigator {
    Navigator::new(
        source,
        Arc::new(SearchSessions::new()),
        Url::parse("https://shop.example.com/checkout/").unwrap(),
        Duration::from_secs(12),
    )
}

fn product_page(screen: Screen) -> catalog_bot::navigation::ProductPage {
    match screen {
        Screen::ProductPage(p) => p,
        other => panic!("expected product page, got {}", other.state()),
    }
}

#[tokio::test]
async fn club_menu_lists_distinct_clubs() {
    let nav = navigator(Arc::new(ScriptedSource::always(twelve_across_two_clubs())));
    match nav.browse_clubs().await.unwrap() {
        Screen::ClubMenu(menu) => {
            assert_eq!(menu.page.items, vec!["A".to_string(), "B".to_string()]);
            assert!(!menu.page.has_next());
        }
        other => panic!("expected club menu, got {}", other.state()),
    }
}

#[tokio::test]
async fn club_pages_carry_prev_and_next_tokens() {
    let nav = navigator(Arc::new(ScriptedSource::always(twelve_across_two_clubs())));
    let first = product_page(
        nav.apply(CHAT, &NavToken::ClubPage { club: "A".into(), page: 0 })
            .await
            .unwrap(),
    );
    assert_eq!(first.basis, Basis::Club("A".into()));
    assert_eq!(first.page.items.len(), 5);
    assert_eq!(first.prev_token(), None);
    let next = first.next_token().expect("A has 7 items");
    assert_eq!(next, NavToken::ClubPage { club: "A".into(), page: 1 });

    let second = product_page(nav.apply(CHAT, &next).await.unwrap());
    let ids: Vec<_> = second.page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["a6", "a7"]);
    assert_eq!(second.next_token(), None);
    assert_eq!(
        second.prev_token(),
        Some(NavToken::ClubPage { club: "A".into(), page: 0 })
    );
}

#[tokio::test]
async fn page_past_the_end_is_clamped() {
    let nav = navigator(Arc::new(ScriptedSource::always(twelve_across_two_clubs())));
    let page = product_page(
        nav.apply(CHAT, &NavToken::ClubPage { club: "B".into(), page: 9 })
            .await
            .unwrap(),
    );
    assert_eq!(page.page.index, 0);
    assert_eq!(page.page.items.len(), 5);
}

#[tokio::test]
async fn unknown_club_renders_an_empty_page() {
    let nav = navigator(Arc::new(ScriptedSource::always(twelve_across_two_clubs())));
    let page = product_page(
        nav.apply(CHAT, &NavToken::ClubPage { club: "Z".into(), page: 0 })
            .await
            .unwrap(),
    );
    assert!(page.page.is_empty());
    assert_eq!(page.next_token(), None);
}

#[tokio::test]
async fn search_pages_through_the_open_session() {
    let nav = navigator(Arc::new(ScriptedSource::always(twelve_across_two_clubs())));
    let first = product_page(nav.search(CHAT, "  jersey ").await.unwrap());
    let session = match &first.basis {
        Basis::Search { session, keyword } => {
            assert_eq!(keyword, "jersey");
            *session
        }
        other => panic!("unexpected basis {other:?}"),
    };
    assert_eq!(first.page.total, 12);
    assert_eq!(first.page.page_count, 3);

    let next = first.next_token().unwrap();
    assert_eq!(next, NavToken::SearchPage { session, page: 1 });
    let second = product_page(nav.apply(CHAT, &next).await.unwrap());
    assert_eq!(second.page.index, 1);
}

#[tokio::test]
async fn older_search_buttons_go_stale() {
    let nav = navigator(Arc::new(ScriptedSource::always(twelve_across_two_clubs())));
    let old = product_page(nav.search(CHAT, "alpha").await.unwrap());
    let _new = nav.search(CHAT, "beta").await.unwrap();

    let old_next = old.next_token().unwrap();
    assert_eq!(nav.apply(CHAT, &old_next).await, Err(ShopError::StaleSession));

    // Same token pressed in another chat is just as stale.
    let other_chat = NavToken::SearchPage { session: 1, page: 0 };
    assert_eq!(nav.apply(CHAT + 1, &other_chat).await, Err(ShopError::StaleSession));
}

#[tokio::test]
async fn failed_search_keeps_previous_session() {
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(twelve_across_two_clubs()),
        Err(ShopError::CatalogUnavailable("503".into())),
        Ok(twelve_across_two_clubs()),
    ]));
    let nav = navigator(source);
    let first = product_page(nav.search(CHAT, "alpha").await.unwrap());
    assert!(matches!(
        nav.search(CHAT, "beta").await,
        Err(ShopError::CatalogUnavailable(_))
    ));
    let next = first.next_token().unwrap();
    assert!(nav.apply(CHAT, &next).await.is_ok());
}

#[tokio::test]
async fn select_opens_variant_menu_in_size_order() {
    let nav = navigator(Arc::new(ScriptedSource::always(twelve_across_two_clubs())));
    let screen = nav
        .apply(CHAT, &NavToken::Select { product_id: "b3".into() })
        .await
        .unwrap();
    let Screen::VariantMenu(menu) = screen else {
        panic!("expected variant menu");
    };
    assert_eq!(menu.product.id, "b3");
    let sizes: Vec<_> = menu.choices.iter().map(|(s, _)| s.as_str()).collect();
    assert_eq!(sizes, vec!["S", "M", "L"]);
    assert_eq!(
        menu.tokens()[1].1,
        NavToken::Variant { product_id: "b3".into(), variant_id: "b3-m".into() }
    );
}

#[tokio::test]
async fn select_on_a_product_that_sold_out_reports_gone() {
    let source = Arc::new(ScriptedSource::new(vec![
        Ok(twelve_across_two_clubs()),
        Ok(CatalogSnapshot::new(vec![product("a1", "Alpha Jersey 1", "A")])),
    ]));
    let nav = navigator(source.clone());
    nav.browse_clubs().await.unwrap();
    let err = nav
        .apply(CHAT, &NavToken::Select { product_id: "b3".into() })
        .await
        .unwrap_err();
    assert_eq!(err, ShopError::ProductGone("b3".into()));
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn variant_builds_checkout_link_without_fetching() {
    let source = Arc::new(ScriptedSource::down());
    let nav = navigator(source.clone());
    let screen = nav
        .apply(
            CHAT,
            &NavToken::Variant { product_id: "a1".into(), variant_id: "a1-m".into() },
        )
        .await
        .unwrap();
    let Screen::CheckoutLink(link) = screen else {
        panic!("expected checkout link");
    };
    assert_eq!(
        link.url.as_str(),
        "https://shop.example.com/checkout/?add-to-cart=a1&variation_id=a1-m"
    );
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn checkout_url_keeps_existing_query() {
    let nav = Navigator::new(
        Arc::new(ScriptedSource::down()),
        Arc::new(SearchSessions::new()),
        Url::parse("https://shop.example.com/cart?ref=bot").unwrap(),
        Duration::from_secs(1),
    );
    assert_eq!(
        nav.checkout_url("7", "71").as_str(),
        "https://shop.example.com/cart?ref=bot&add-to-cart=7&variation_id=71"
    );
}

#[tokio::test]
async fn source_down_is_catalog_unavailable() {
    let nav = navigator(Arc::new(ScriptedSource::down()));
    assert!(matches!(nav.browse_clubs().await, Err(ShopError::CatalogUnavailable(_))));
    assert!(matches!(
        nav.apply(CHAT, &NavToken::ClubMenu { page: 0 }).await,
        Err(ShopError::CatalogUnavailable(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn slow_source_times_out() {
    let source = Arc::new(ScriptedSource::slow(
        twelve_across_two_clubs(),
        Duration::from_secs(30),
    ));
    let nav = navigator(source);
    assert_eq!(
        nav.browse_clubs().await,
        Err(ShopError::CatalogUnavailable("fetch timed out".into()))
    );
}

#[tokio::test]
async fn unrecognized_token_is_rejected() {
    let nav = navigator(Arc::new(ScriptedSource::always(twelve_across_two_clubs())));
    assert_eq!(
        nav.apply(CHAT, &NavToken::Unrecognized).await,
        Err(ShopError::UnrecognizedToken)
    );
}

#[tokio::test]
async fn digest_token_resolves_to_its_club() {
    let long = "Локомотив Москва Локомотив Москва";
    let snapshot = CatalogSnapshot::new(vec![
        product("r1", "Home Kit", long),
        product("r2", "Away Kit", long),
        product("b1", "Beta Jersey", "B"),
    ]);
    let nav = navigator(Arc::new(ScriptedSource::always(snapshot)));
    let token = NavToken::club_page(long, 0);
    assert!(matches!(token, NavToken::ClubDigest { .. }));

    let page = product_page(nav.apply(CHAT, &token).await.unwrap());
    assert_eq!(page.basis, Basis::Club(long.to_string()));
    let ids: Vec<_> = page.page.items.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r2"]);
}

#[tokio::test]
async fn digest_for_a_vanished_club_is_not_found() {
    let nav = navigator(Arc::new(ScriptedSource::always(twelve_across_two_clubs())));
    let token = NavToken::ClubDigest {
        digest: 42,
        page: 0,
    };
    assert!(matches!(
        nav.apply(CHAT, &token).await,
        Err(ShopError::NotFound(_))
    ));
}
