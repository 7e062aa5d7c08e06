//! Integration tests for quantity change rules.

use marketplace_cart::{CartError, NoticeLevel};
use marketplace_core::{ItemKey, QuantityChangeRejected};
use marketplace_integration_tests::{Fixture, MIXED_CART};

fn quantity(fixture: &Fixture, key: ItemKey) -> u32 {
    fixture
        .store
        .get(key)
        .map_or(0, |item| item.quantity())
}

#[test]
fn test_service_quantity_never_changes() {
    let fixture = Fixture::from_json(MIXED_CART);
    let key = ItemKey::service(1);
    let rejected = Err(CartError::Quantity(
        QuantityChangeRejected::FixedServiceQuantity,
    ));

    assert_eq!(fixture.page.increment(key), rejected);
    assert_eq!(fixture.page.decrement(key), rejected);
    for requested in [-1, 0, 1, 2, 50] {
        assert_eq!(fixture.page.handle_quantity_change(key, requested), rejected);
    }

    assert_eq!(quantity(&fixture, key), 1);
    assert!(
        fixture
            .notices
            .notices()
            .iter()
            .all(|notice| notice.level == NoticeLevel::Info)
    );
}

#[test]
fn test_product_quantity_below_one_is_ignored() {
    let fixture = Fixture::from_json(MIXED_CART);
    let key = ItemKey::product(1);

    for requested in [0, -1, -100] {
        assert_eq!(
            fixture.page.handle_quantity_change(key, requested),
            Err(CartError::Quantity(QuantityChangeRejected::BelowMinimum {
                requested
            }))
        );
    }

    assert_eq!(quantity(&fixture, key), 2);
    assert!(fixture.notices.notices().is_empty());
}

#[test]
fn test_product_quantity_at_least_one_is_applied() {
    let fixture = Fixture::from_json(MIXED_CART);
    let key = ItemKey::product(1);

    assert_eq!(fixture.page.handle_quantity_change(key, 1), Ok(()));
    assert_eq!(quantity(&fixture, key), 1);

    assert_eq!(fixture.page.handle_quantity_change(key, 7), Ok(()));
    assert_eq!(quantity(&fixture, key), 7);

    assert_eq!(fixture.page.decrement(key), Ok(()));
    assert_eq!(quantity(&fixture, key), 6);
}

#[test]
fn test_decrement_at_one_keeps_product() {
    let fixture = Fixture::from_json(MIXED_CART);
    let key = ItemKey::product(2);

    assert!(fixture.page.decrement(key).is_err());
    assert_eq!(quantity(&fixture, key), 1);
}

#[test]
fn test_tracked_stock_caps_quantity() {
    let fixture = Fixture::from_json(MIXED_CART);
    let key = ItemKey::product(2);

    assert_eq!(fixture.page.handle_quantity_change(key, 5), Ok(()));
    assert_eq!(
        fixture.page.increment(key),
        Err(CartError::Quantity(QuantityChangeRejected::ExceedsStock {
            requested: 6,
            available: 5
        }))
    );
    assert_eq!(quantity(&fixture, key), 5);
}
