//! Integration tests for checkout gating.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use marketplace_cart::{CartPage, CartProvider, CheckoutError, NavigationHistory, NoticeLog};
use marketplace_core::{DeliveryInfo, DeliveryMode};
use marketplace_integration_tests::{Fixture, MIXED_CART, SERVICES_CART};

fn delivery() -> DeliveryInfo {
    DeliveryInfo::new("Jean Dupont", "1 Rue X", "0600000000", DeliveryMode::Standard)
        .expect("Failed to build delivery info")
}

fn counting_page(fixture: Fixture) -> (CartPage<marketplace_cart::CartStore>, Arc<AtomicUsize>) {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let page = fixture.page.with_checkout_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    (page, fired)
}

#[test]
fn test_empty_cart_never_checks_out() {
    let fixture = Fixture::from_json("[]");
    fixture
        .store
        .save_delivery_info(delivery())
        .expect("Failed to save delivery info");
    let (mut page, fired) = counting_page(fixture);

    assert_eq!(page.handle_checkout(), Err(CheckoutError::EmptyCart));
    assert_eq!(page.handle_checkout(), Err(CheckoutError::EmptyCart));
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn test_products_without_delivery_info_reveal_form() {
    let fixture = Fixture::from_json(MIXED_CART);
    let notices = fixture.notices.clone();
    let (mut page, fired) = counting_page(fixture);

    assert!(!page.show_delivery());
    assert_eq!(
        page.handle_checkout(),
        Err(CheckoutError::MissingDeliveryInfo)
    );
    assert!(page.show_delivery());
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert_eq!(
        notices.last().map(|n| n.message),
        Some(CheckoutError::MissingDeliveryInfo.to_string())
    );
}

#[test]
fn test_services_only_cart_checks_out_without_delivery_info() {
    let (mut page, fired) = counting_page(Fixture::from_json(SERVICES_CART));

    let receipt = page
        .handle_checkout()
        .expect("Failed to check out");
    assert_eq!(receipt.items.len(), 2);
    assert!(receipt.delivery_info.is_none());
    assert!(!page.show_delivery());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_services_only_cart_checks_out_with_delivery_info() {
    let fixture = Fixture::from_json(SERVICES_CART);
    fixture
        .store
        .save_delivery_info(delivery())
        .expect("Failed to save delivery info");
    let (mut page, fired) = counting_page(fixture);

    let receipt = page
        .handle_checkout()
        .expect("Failed to check out");
    assert_eq!(receipt.delivery_info, Some(delivery()));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_checkout_with_delivery_clears_cart_through_hook() {
    let fixture = Fixture::from_json(MIXED_CART);
    let store = fixture.store.clone();
    store
        .save_delivery_info(delivery())
        .expect("Failed to save delivery info");
    let mut page = fixture.page.with_checkout_hook(store.clear_on_checkout());

    let receipt = page
        .handle_checkout()
        .expect("Failed to check out");
    assert_eq!(receipt.summary.products_count, 2);
    assert!(store.is_empty());
    assert_eq!(store.delivery_info(), Some(delivery()));

    assert_eq!(page.handle_checkout(), Err(CheckoutError::EmptyCart));
}

#[test]
fn test_standalone_page_without_hook() {
    let store = marketplace_cart::CartStore::new();
    let mut page = CartPage::new(
        store,
        Arc::new(NoticeLog::new()),
        Arc::new(NavigationHistory::new()),
    );
    assert_eq!(page.handle_checkout(), Err(CheckoutError::EmptyCart));
}
