//! Cart and checkout errors.

use thiserror::Error;

use marketplace_core::{DeliveryInfoError, ItemKey, QuantityChangeRejected};

/// Errors returned by cart store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// No item with this key is in the cart.
    #[error("item {0} is not in the cart")]
    ItemNotFound(ItemKey),

    /// Services can only be booked once per cart.
    #[error("service {0} is already in the cart")]
    ServiceAlreadyInCart(ItemKey),

    /// The quantity change was refused.
    #[error("quantity change rejected: {0}")]
    Quantity(#[from] QuantityChangeRejected),

    /// The delivery form is incomplete.
    #[error("invalid delivery info: {0}")]
    InvalidDelivery(#[from] DeliveryInfoError),

    /// A previous writer panicked while holding the cart lock.
    #[error("cart lock poisoned")]
    LockPoisoned,
}

/// Reasons checkout cannot proceed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout attempted with zero items.
    #[error("your cart is empty")]
    EmptyCart,

    /// The cart holds products but no delivery information has been saved.
    #[error("please fill in your delivery information")]
    MissingDeliveryInfo,

    /// The cart total does not fit a decimal amount.
    #[error("cart total is too large")]
    TotalOverflow,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
