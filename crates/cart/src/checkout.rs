//! Cart totals and checkout gating.

use rust_decimal::Decimal;
use serde::Serialize;

use marketplace_core::{CartItem, CurrencyCode, DeliveryInfo, ItemKind, Price};

use crate::error::CheckoutError;

/// Values derived from the cart contents.
///
/// Always computed from a fresh snapshot, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Sum of unit price times quantity over every item.
    pub total: Decimal,
    /// Number of product lines.
    pub products_count: usize,
    /// Number of service lines.
    pub services_count: usize,
    /// Total number of units.
    pub item_count: u64,
}

impl CartSummary {
    /// Summarize a list of items.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::TotalOverflow`] if the sum of the line totals
    /// does not fit a [`Decimal`].
    pub fn from_items(items: &[CartItem]) -> Result<Self, CheckoutError> {
        items.iter().try_fold(
            Self {
                total: Decimal::ZERO,
                products_count: 0,
                services_count: 0,
                item_count: 0,
            },
            |mut summary, item| {
                summary.total = summary
                    .total
                    .checked_add(item.line_total())
                    .ok_or(CheckoutError::TotalOverflow)?;
                summary.item_count += u64::from(item.quantity());
                match item.kind() {
                    ItemKind::Product => summary.products_count += 1,
                    ItemKind::Service => summary.services_count += 1,
                }
                Ok(summary)
            },
        )
    }

    /// Whether the cart has at least one physical product.
    #[must_use]
    pub const fn has_products(&self) -> bool {
        self.products_count > 0
    }

    /// Whether the cart has no lines at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products_count == 0 && self.services_count == 0
    }

    /// The total as a displayable price.
    #[must_use]
    pub const fn total_price(&self, currency_code: CurrencyCode) -> Price {
        Price::new(self.total, currency_code)
    }
}

/// Snapshot handed to the checkout hook after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub items: Vec<CartItem>,
    pub summary: CartSummary,
    pub delivery_info: Option<DeliveryInfo>,
}

/// Caller-supplied action run after a successful checkout.
pub type CheckoutHook = Box<dyn Fn(&CheckoutReceipt) + Send + Sync>;

/// Decide whether checkout may proceed.
///
/// An empty cart never checks out. Delivery information is required only
/// when at least one product is present; service-only carts check out
/// regardless of it.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] or [`CheckoutError::MissingDeliveryInfo`],
/// or [`CheckoutError::TotalOverflow`] if the total cannot be computed.
pub fn gate(
    items: Vec<CartItem>,
    delivery_info: Option<DeliveryInfo>,
) -> Result<CheckoutReceipt, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let summary = CartSummary::from_items(&items)?;
    if summary.has_products() && delivery_info.is_none() {
        return Err(CheckoutError::MissingDeliveryInfo);
    }

    Ok(CheckoutReceipt {
        items,
        summary,
        delivery_info,
    })
}
