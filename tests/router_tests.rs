mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use common::{catalog, router_with, MockProductRepository};
use storefront_cli::models::ProductId;
use storefront_cli::router::{Route, RouterError, StoreRouter};
use storefront_cli::views::{TemplateRegistry, UpdateForm, View, ViewOptions, ENTER_KEY};

#[tokio::test]
async fn test_start_lands_on_sorted_index() {
    let mut router = router_with(MockProductRepository::new(catalog()));

    router.start().await.unwrap();

    assert_eq!(router.current_route(), Some(&Route::Index));
    assert!(router.index_view().base().is_visible());

    let visible = router.container().visible();
    assert_eq!(visible.len(), 1);
    let content = &visible[0].content;
    let answer = content.find("Answer Blend").unwrap();
    let espresso = content.find("Espresso Beans").unwrap();
    let tea = content.find("Green Tea").unwrap();
    assert!(answer < espresso && espresso < tea);
}

#[tokio::test]
async fn test_failed_fetch_never_reaches_index() {
    let mut router = router_with(MockProductRepository::failing());

    let result = router.start().await;

    assert!(matches!(result, Err(RouterError::CatalogError(_))));
    assert_eq!(router.current_route(), None);
    assert!(router.products().is_empty());
    assert!(router.container().visible().is_empty());
}

#[tokio::test]
async fn test_detail_view_is_built_once_and_reused() {
    let mut router = router_with(MockProductRepository::new(catalog()));
    router.start().await.unwrap();

    router.navigate_to("item/42").await.unwrap();
    let first = router.product_view(&ProductId::from("42")).unwrap().base().id();

    router.navigate_to("").await.unwrap();
    router.navigate_to("#item/42").await.unwrap();
    let second = router.product_view(&ProductId::from("42")).unwrap().base().id();

    assert_eq!(first, second);
    assert_eq!(router.views_built(), 1);
    // index list + one detail view
    assert_eq!(router.container().len(), 2);
}

#[tokio::test]
async fn test_summary_view_is_built_once_and_reused() {
    let mut router = router_with(MockProductRepository::new(catalog()));
    router.start().await.unwrap();

    router.navigate_to("summary/42").await.unwrap();
    let first = router.summary_view(&ProductId::from("42")).unwrap().base().id();

    router.navigate_to("item/42").await.unwrap();
    router.navigate_to("summary/42").await.unwrap();
    let second = router.summary_view(&ProductId::from("42")).unwrap().base().id();

    assert_eq!(first, second);
    assert_eq!(router.summaries_built(), 1);
    assert_eq!(router.views_built(), 1);
    // index list, summary, detail
    assert_eq!(router.container().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_outgoing_views_hide_together_before_target_shows() {
    let fade = Duration::from_millis(200);
    let mut router = StoreRouter::new(
        Arc::new(MockProductRepository::new(catalog())),
        TemplateRegistry::default(),
        ViewOptions {
            fade,
            pulse_step: Duration::ZERO,
        },
    )
    .unwrap();
    router.start().await.unwrap();
    router.navigate_to("item/1").await.unwrap();
    router.navigate_to("summary/2").await.unwrap();

    // bring two more views back so three are showing at once
    router.index_view().base().show().await;
    router
        .product_view(&ProductId::from("1"))
        .unwrap()
        .base()
        .show()
        .await;
    let outgoing: Vec<uuid::Uuid> = router.container().visible().iter().map(|v| v.id).collect();
    assert_eq!(outgoing.len(), 3);

    let container = router.container().clone();
    let started = tokio::time::Instant::now();
    let (result, (while_hiding, while_showing)) = tokio::join!(router.navigate_to("item/42"), async {
        tokio::time::sleep(fade / 2).await;
        let while_hiding = container.visible();
        tokio::time::sleep(fade).await;
        let while_showing = container.visible();
        (while_hiding, while_showing)
    });
    result.unwrap();

    // one fade out for all three, then one fade in
    assert_eq!(started.elapsed(), fade * 2);

    let target = router.product_view(&ProductId::from("42")).unwrap().base().id();
    let hiding_ids: Vec<uuid::Uuid> = while_hiding.iter().map(|v| v.id).collect();
    assert_eq!(hiding_ids, outgoing);
    assert!(!hiding_ids.contains(&target));

    assert_eq!(while_showing.len(), 1);
    assert_eq!(while_showing[0].id, target);

    let visible = router.container().visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, target);
}

#[tokio::test]
async fn test_navigation_hides_everything_else() {
    let mut router = router_with(MockProductRepository::new(catalog()));
    router.start().await.unwrap();

    router.navigate_to("item/1").await.unwrap();
    router.navigate_to("item/2").await.unwrap();
    router.navigate_to("summary/2").await.unwrap();

    let visible = router.container().visible();
    assert_eq!(visible.len(), 1);
    let summary = router.summary_view(&ProductId::from("2")).unwrap();
    assert_eq!(visible[0].id, summary.base().id());
    assert!(!router.index_view().base().is_visible());
    assert!(!router.product_view(&ProductId::from("1")).unwrap().base().is_visible());
}

#[tokio::test]
async fn test_already_hidden_views_do_not_animate() {
    let mut router = router_with(MockProductRepository::new(catalog()));
    router.start().await.unwrap();
    router.navigate_to("item/1").await.unwrap();

    let index_fades = router.index_view().base().animations_started();
    router.navigate_to("item/2").await.unwrap();

    // index was already hidden: no new fade
    assert_eq!(router.index_view().base().animations_started(), index_fades);
    // the shown view was already visible: no new fade
    let view = router.product_view(&ProductId::from("2")).unwrap();
    let fades = view.base().animations_started();
    router.navigate_to("item/2").await.unwrap();
    assert_eq!(router.product_view(&ProductId::from("2")).unwrap().base().animations_started(), fades);
}

#[tokio::test]
async fn test_unknown_product_builds_nothing() {
    let mut router = router_with(MockProductRepository::new(catalog()));
    router.start().await.unwrap();

    let result = router.navigate_to("item/999").await;

    assert!(matches!(result, Err(RouterError::ProductNotFound(id)) if id.as_str() == "999"));
    assert_eq!(router.views_built(), 0);
    assert_eq!(router.current_route(), Some(&Route::Index));
    assert!(router.index_view().base().is_visible());
}

#[tokio::test]
async fn test_unknown_fragment_is_a_route_error() {
    let mut router = router_with(MockProductRepository::new(catalog()));
    router.start().await.unwrap();

    assert!(matches!(
        router.navigate_to("checkout").await,
        Err(RouterError::RouteError(_))
    ));
}

#[tokio::test]
async fn test_order_flow_updates_widget_and_summary() {
    let mut router = router_with(MockProductRepository::new(catalog()));
    router.start().await.unwrap();

    router.navigate_to("item/42").await.unwrap();
    router
        .update_current(&UpdateForm::new("1", "1 Main St"))
        .await
        .unwrap();
    // inserting a line does not redraw the badge
    assert_eq!(router.cart_widget().renders(), 0);

    router.navigate_to("summary/42").await.unwrap();
    let summary = router.summary_view(&ProductId::from("42")).unwrap();
    assert!(summary.base().content().contains("1 Main St"));

    let item = router
        .key_press(ENTER_KEY, &UpdateForm::new("2", "1 Main St"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(item.quantity, 2);

    assert_eq!(router.cart_widget().renders(), 1);
    assert!(router.cart_widget().content().contains("$84.00"));
    let summary = router.summary_view(&ProductId::from("42")).unwrap();
    assert!(summary.base().content().contains("$84.00"));
}

#[tokio::test]
async fn test_invalid_quantity_is_rejected() {
    let mut router = router_with(MockProductRepository::new(catalog()));
    router.start().await.unwrap();
    router.navigate_to("item/1").await.unwrap();

    let result = router.update_current(&UpdateForm::new("two", "")).await;

    assert!(matches!(result, Err(RouterError::ViewError(_))));
    assert!(router.cart().is_empty());
}

#[tokio::test]
async fn test_index_has_no_order_form() {
    let mut router = router_with(MockProductRepository::new(catalog()));
    router.start().await.unwrap();

    let result = router.update_current(&UpdateForm::new("1", "")).await;
    assert!(matches!(result, Err(RouterError::NoActiveForm)));
}

#[tokio::test]
async fn test_back_hides_summary() {
    let mut router = router_with(MockProductRepository::new(catalog()));
    router.start().await.unwrap();
    router.navigate_to("summary/1").await.unwrap();

    router.back().await;

    assert!(router.container().visible().is_empty());
    assert_eq!(router.current_route(), Some(&Route::Summary(ProductId::from("1"))));
}

#[tokio::test]
async fn test_catalog_is_fetched_once_per_start() {
    let repository = Arc::new(MockProductRepository::new(catalog()));
    let mut router = StoreRouter::new(
        repository.clone(),
        TemplateRegistry::default(),
        ViewOptions::instant(),
    )
    .unwrap();

    router.start().await.unwrap();
    router.navigate_to("item/1").await.unwrap();
    router.navigate_to("summary/1").await.unwrap();

    assert_eq!(repository.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_template_fails_construction() {
    let result = StoreRouter::new(
        Arc::new(MockProductRepository::new(catalog())),
        TemplateRegistry::empty(),
        ViewOptions::instant(),
    );
    assert!(matches!(result, Err(RouterError::ViewError(_))));
}
