//! Cart line items.
//!
//! A [`CartItem`] is either a purchasable product or a bookable service. Items
//! are validated once, when they are created, so that every item held by a
//! cart has a non-negative price and a positive quantity. Services are pinned
//! to a quantity of exactly one.
//!
//! Items coming from the catalog API arrive as [`CartItemInput`], where price
//! and quantity may be missing. Missing values take their neutral defaults
//! (`0` and `1`) during conversion and are never defaulted again afterwards.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ItemId;

/// Discriminates products (physical, shippable) from services (booked).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Product,
    Service,
}

impl ItemKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Service => "service",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite key identifying an item in a cart.
///
/// Ids are only unique per kind: product `3` and service `3` are different
/// items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub id: ItemId,
}

impl ItemKey {
    /// Create a key from its parts.
    #[must_use]
    pub const fn new(kind: ItemKind, id: ItemId) -> Self {
        Self { kind, id }
    }

    /// Key of a product.
    #[must_use]
    pub const fn product(id: i32) -> Self {
        Self::new(ItemKind::Product, ItemId::new(id))
    }

    /// Key of a service.
    #[must_use]
    pub const fn service(id: i32) -> Self {
        Self::new(ItemKind::Service, ItemId::new(id))
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Errors that can occur when creating a [`CartItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// The unit price is below zero.
    #[error("price cannot be negative (got {price})")]
    NegativePrice {
        /// The rejected price.
        price: Decimal,
    },
    /// The quantity is zero.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    /// A service was given a quantity other than one.
    #[error("service quantity must be exactly 1 (got {quantity})")]
    ServiceQuantity {
        /// The rejected quantity.
        quantity: u32,
    },
    /// A stock-tracked product was given more than is available.
    #[error("only {available} in stock (requested {quantity})")]
    ExceedsStock {
        /// The rejected quantity.
        quantity: u32,
        /// Units available.
        available: u32,
    },
    /// Unit price times quantity does not fit a [`Decimal`].
    #[error("line total for {quantity} x {price} is too large")]
    PriceOverflow {
        /// The unit price.
        price: Decimal,
        /// The rejected quantity.
        quantity: u32,
    },
}

/// Reasons a quantity change on an existing item is refused.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChangeRejected {
    /// Services always have a quantity of one.
    #[error("service quantity is fixed at 1")]
    FixedServiceQuantity,
    /// The requested quantity is below one.
    #[error("quantity must be at least 1 (requested {requested})")]
    BelowMinimum {
        /// The requested quantity.
        requested: i64,
    },
    /// The requested quantity exceeds the tracked stock.
    #[error("only {available} in stock (requested {requested})")]
    ExceedsStock {
        /// The requested quantity.
        requested: i64,
        /// Units available.
        available: u32,
    },
    /// The requested quantity does not fit a `u32`.
    #[error("quantity {requested} is out of range")]
    OutOfRange {
        /// The requested quantity.
        requested: i64,
    },
    /// The line total at the requested quantity does not fit a [`Decimal`].
    #[error("line total at quantity {requested} is too large")]
    LineTotalOverflow {
        /// The requested quantity.
        requested: i64,
    },
}

/// Raw item shape as received from the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Service duration in minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub track_quantity: Option<bool>,
    #[serde(default)]
    pub available_stock: Option<u32>,
}

/// A validated cart line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CartItemInput", rename_all = "camelCase")]
pub struct CartItem {
    id: ItemId,
    #[serde(rename = "type")]
    kind: ItemKind,
    name: String,
    price: Decimal,
    quantity: u32,
    images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<u32>,
    #[serde(skip_serializing_if = "core::ops::Not::not")]
    track_quantity: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    available_stock: Option<u32>,
}

impl CartItem {
    /// Create a product with a quantity of one.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NegativePrice`] if `price` is below zero.
    pub fn product(id: ItemId, name: impl Into<String>, price: Decimal) -> Result<Self, ItemError> {
        Self::new(ItemKind::Product, id, name.into(), price)
    }

    /// Create a service. Its quantity is one and stays one.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::NegativePrice`] if `price` is below zero.
    pub fn service(id: ItemId, name: impl Into<String>, price: Decimal) -> Result<Self, ItemError> {
        Self::new(ItemKind::Service, id, name.into(), price)
    }

    fn new(kind: ItemKind, id: ItemId, name: String, price: Decimal) -> Result<Self, ItemError> {
        if price < Decimal::ZERO {
            return Err(ItemError::NegativePrice { price });
        }

        Ok(Self {
            id,
            kind,
            name,
            price,
            quantity: 1,
            images: Vec::new(),
            category: None,
            duration: None,
            track_quantity: false,
            available_stock: None,
        })
    }

    /// Set the initial quantity.
    ///
    /// # Errors
    ///
    /// Returns an error if `quantity` is zero, if the item is a service and
    /// `quantity` is not one, or if it exceeds the tracked stock.
    pub fn with_quantity(mut self, quantity: u32) -> Result<Self, ItemError> {
        self.validate_quantity(quantity)?;
        self.quantity = quantity;
        Ok(self)
    }

    /// Enable stock tracking with `available` units. Ignored for services.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError::ExceedsStock`] if the current quantity is above
    /// `available`.
    pub fn with_stock(mut self, available: u32) -> Result<Self, ItemError> {
        if self.kind == ItemKind::Service {
            return Ok(self);
        }
        if self.quantity > available {
            return Err(ItemError::ExceedsStock {
                quantity: self.quantity,
                available,
            });
        }
        self.track_quantity = true;
        self.available_stock = Some(available);
        Ok(self)
    }

    /// Attach image references, in display order.
    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Attach a catalog category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach a duration in minutes. Ignored for products.
    #[must_use]
    pub fn with_duration(mut self, minutes: u32) -> Self {
        if matches!(self.kind, ItemKind::Service) {
            self.duration = Some(minutes);
        }
        self
    }

    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> ItemKind {
        self.kind
    }

    /// The `(kind, id)` key of this item.
    #[must_use]
    pub const fn key(&self) -> ItemKey {
        ItemKey::new(self.kind, self.id)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Service duration in minutes.
    #[must_use]
    pub const fn duration(&self) -> Option<u32> {
        self.duration
    }

    /// Units available when stock tracking is enabled.
    #[must_use]
    pub const fn stock_limit(&self) -> Option<u32> {
        if self.track_quantity {
            self.available_stock
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_product(&self) -> bool {
        matches!(self.kind, ItemKind::Product)
    }

    #[must_use]
    pub const fn is_service(&self) -> bool {
        matches!(self.kind, ItemKind::Service)
    }

    /// Unit price times quantity.
    ///
    /// Quantities are only accepted when this product is representable, so
    /// the saturating fallback is never reached for a validated item.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.checked_line_total(self.quantity).unwrap_or(Decimal::MAX)
    }

    fn checked_line_total(&self, quantity: u32) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(quantity))
    }

    /// Check whether this item may be set to `requested` units.
    ///
    /// Returns the accepted quantity.
    ///
    /// # Errors
    ///
    /// Returns the reason the change is refused.
    pub fn check_quantity(&self, requested: i64) -> Result<u32, QuantityChangeRejected> {
        if self.kind == ItemKind::Service {
            return Err(QuantityChangeRejected::FixedServiceQuantity);
        }
        if requested < 1 {
            return Err(QuantityChangeRejected::BelowMinimum { requested });
        }
        let quantity =
            u32::try_from(requested).map_err(|_| QuantityChangeRejected::OutOfRange { requested })?;
        match self.stock_limit() {
            Some(available) if quantity > available => Err(QuantityChangeRejected::ExceedsStock {
                requested,
                available,
            }),
            _ if self.checked_line_total(quantity).is_none() => {
                Err(QuantityChangeRejected::LineTotalOverflow { requested })
            }
            _ => Ok(quantity),
        }
    }

    /// Set the quantity of a product.
    ///
    /// # Errors
    ///
    /// Returns the reason the change is refused; the item is left unchanged.
    pub fn set_quantity(&mut self, requested: i64) -> Result<(), QuantityChangeRejected> {
        self.quantity = self.check_quantity(requested)?;
        Ok(())
    }

    fn validate_quantity(&self, quantity: u32) -> Result<(), ItemError> {
        if quantity == 0 {
            return Err(ItemError::ZeroQuantity);
        }
        if self.kind == ItemKind::Service && quantity != 1 {
            return Err(ItemError::ServiceQuantity { quantity });
        }
        match self.stock_limit() {
            Some(available) if quantity > available => Err(ItemError::ExceedsStock {
                quantity,
                available,
            }),
            _ if self.checked_line_total(quantity).is_none() => Err(ItemError::PriceOverflow {
                price: self.price,
                quantity,
            }),
            _ => Ok(()),
        }
    }
}

impl TryFrom<CartItemInput> for CartItem {
    type Error = ItemError;

    fn try_from(input: CartItemInput) -> Result<Self, Self::Error> {
        let mut item = Self::new(
            input.kind,
            input.id,
            input.name,
            input.price.unwrap_or(Decimal::ZERO),
        )?
        .with_images(input.images);

        if let Some(category) = input.category {
            item = item.with_category(category);
        }
        if let Some(minutes) = input.duration {
            item = item.with_duration(minutes);
        }

        let quantity = input.quantity.unwrap_or(1);
        if input.kind == ItemKind::Product && input.track_quantity == Some(true) {
            item.track_quantity = true;
            item.available_stock = input.available_stock;
        }
        item.with_quantity(quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(kind: ItemKind, price: Option<i64>, quantity: Option<u32>) -> CartItemInput {
        CartItemInput {
            id: ItemId::new(1),
            kind,
            name: "Argan oil".to_string(),
            price: price.map(Decimal::from),
            quantity,
            images: Vec::new(),
            category: None,
            duration: None,
            track_quantity: None,
            available_stock: None,
        }
    }

    #[test]
    fn test_missing_price_and_quantity_take_neutral_defaults() {
        let item = CartItem::try_from(input(ItemKind::Product, None, None)).unwrap();
        assert_eq!(item.price(), Decimal::ZERO);
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = CartItem::try_from(input(ItemKind::Product, Some(-5), Some(1)));
        assert!(matches!(result, Err(ItemError::NegativePrice { .. })));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let result = CartItem::try_from(input(ItemKind::Product, Some(5), Some(0)));
        assert_eq!(result, Err(ItemError::ZeroQuantity));
    }

    #[test]
    fn test_service_with_quantity_other_than_one_rejected() {
        let result = CartItem::try_from(input(ItemKind::Service, Some(5), Some(3)));
        assert_eq!(result, Err(ItemError::ServiceQuantity { quantity: 3 }));
    }

    #[test]
    fn test_stock_fields_dropped_for_services() {
        let mut raw = input(ItemKind::Service, Some(50), None);
        raw.track_quantity = Some(true);
        raw.available_stock = Some(0);
        let item = CartItem::try_from(raw).unwrap();
        assert_eq!(item.stock_limit(), None);
    }

    #[test]
    fn test_duration_dropped_for_products() {
        let mut raw = input(ItemKind::Product, Some(50), None);
        raw.duration = Some(60);
        let item = CartItem::try_from(raw).unwrap();
        assert_eq!(item.duration(), None);
    }

    #[test]
    fn test_initial_quantity_above_stock_rejected() {
        let mut raw = input(ItemKind::Product, Some(5), Some(4));
        raw.track_quantity = Some(true);
        raw.available_stock = Some(3);
        assert_eq!(
            CartItem::try_from(raw),
            Err(ItemError::ExceedsStock {
                quantity: 4,
                available: 3
            })
        );
    }

    #[test]
    fn test_untracked_stock_is_not_enforced() {
        let mut raw = input(ItemKind::Product, Some(5), Some(4));
        raw.track_quantity = Some(false);
        raw.available_stock = Some(3);
        let item = CartItem::try_from(raw).unwrap();
        assert_eq!(item.stock_limit(), None);
        assert_eq!(item.quantity(), 4);
    }

    #[test]
    fn test_service_quantity_change_refused() {
        let mut item = CartItem::service(ItemId::new(2), "Massage", Decimal::from(300)).unwrap();
        assert_eq!(
            item.set_quantity(2),
            Err(QuantityChangeRejected::FixedServiceQuantity)
        );
        assert_eq!(
            item.set_quantity(1),
            Err(QuantityChangeRejected::FixedServiceQuantity)
        );
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_product_quantity_change() {
        let mut item = CartItem::product(ItemId::new(1), "Soap", Decimal::from(4)).unwrap();
        assert_eq!(
            item.set_quantity(0),
            Err(QuantityChangeRejected::BelowMinimum { requested: 0 })
        );
        assert_eq!(item.quantity(), 1);

        item.set_quantity(5).unwrap();
        assert_eq!(item.quantity(), 5);
        assert_eq!(item.line_total(), Decimal::from(20));
    }

    #[test]
    fn test_product_quantity_change_respects_stock() {
        let mut item = CartItem::product(ItemId::new(1), "Soap", Decimal::from(4))
            .unwrap()
            .with_stock(2)
            .unwrap();
        assert_eq!(
            item.set_quantity(3),
            Err(QuantityChangeRejected::ExceedsStock {
                requested: 3,
                available: 2
            })
        );
        item.set_quantity(2).unwrap();
        assert_eq!(item.quantity(), 2);
    }

    #[test]
    fn test_out_of_range_quantity() {
        let item = CartItem::product(ItemId::new(1), "Soap", Decimal::from(4)).unwrap();
        let requested = i64::from(u32::MAX) + 1;
        assert_eq!(
            item.check_quantity(requested),
            Err(QuantityChangeRejected::OutOfRange { requested })
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let json = r#"{"id": 4, "type": "service", "name": "Guided tour", "price": 120, "quantity": 2}"#;
        assert!(serde_json::from_str::<CartItem>(json).is_err());

        let json = r#"{"id": 4, "type": "service", "name": "Guided tour", "price": 120, "duration": 90}"#;
        let item: CartItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.key(), ItemKey::service(4));
        assert_eq!(item.duration(), Some(90));
    }

    #[test]
    fn test_serialized_item_reads_back() {
        let item = CartItem::product(ItemId::new(9), "Honey", Decimal::new(1250, 2))
            .unwrap()
            .with_stock(10)
            .unwrap()
            .with_quantity(3)
            .unwrap()
            .with_images(vec!["honey.jpg".to_string()])
            .with_category("natural");

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "product");
        assert_eq!(json["trackQuantity"], true);
        assert_eq!(json["availableStock"], 10);

        let parsed: CartItem = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn test_unrepresentable_line_total_rejected() {
        let mut raw = input(ItemKind::Product, None, Some(2));
        raw.price = Some(Decimal::MAX);
        assert_eq!(
            CartItem::try_from(raw),
            Err(ItemError::PriceOverflow {
                price: Decimal::MAX,
                quantity: 2
            })
        );

        let mut item = CartItem::product(ItemId::new(1), "Gold bar", Decimal::MAX).unwrap();
        assert_eq!(item.line_total(), Decimal::MAX);
        assert_eq!(
            item.set_quantity(2),
            Err(QuantityChangeRejected::LineTotalOverflow { requested: 2 })
        );
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_key_display() {
        assert_eq!(ItemKey::product(3).to_string(), "product:3");
        assert_eq!(ItemKey::service(3).to_string(), "service:3");
        assert_ne!(ItemKey::product(3), ItemKey::service(3));
    }
}
