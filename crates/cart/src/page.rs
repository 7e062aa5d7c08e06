//! Cart page logic.
//!
//! [`CartPage`] is the consumer side of the cart store: it derives totals,
//! applies the quantity rules, gates checkout and owns the delivery form.
//! Every handler reports its outcome to the user through the [`Notifier`]
//! and also returns a typed result so callers can tell the causes apart.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use marketplace_core::{
    CartItem, DeliveryForm, DeliveryInfo, ItemKey, ItemKind, QuantityChangeRejected,
};

use crate::checkout::{self, CartSummary, CheckoutHook, CheckoutReceipt};
use crate::error::{CartError, CheckoutError};
use crate::navigation::Navigator;
use crate::notify::Notifier;
use crate::store::CartProvider;

/// Notice shown when a service quantity change is attempted.
pub const SERVICE_QUANTITY_FIXED: &str = "Service quantity is fixed at 1";
/// Notice shown after an item is removed.
pub const ITEM_REMOVED: &str = "Item removed from cart";
/// Notice shown after delivery information is saved.
pub const DELIVERY_SAVED: &str = "Delivery information saved";
/// Notice shown after a successful checkout.
pub const ORDER_PLACED: &str = "Order placed successfully";

/// The cart page.
pub struct CartPage<P> {
    provider: P,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    show_delivery: bool,
    delivery_form: DeliveryForm,
    on_checkout_success: Option<CheckoutHook>,
}

impl<P: CartProvider> CartPage<P> {
    /// Create a page over `provider`.
    ///
    /// The delivery form starts prefilled from the saved delivery record.
    pub fn new(provider: P, notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        let delivery_form = provider
            .delivery_info()
            .as_ref()
            .map(DeliveryForm::from)
            .unwrap_or_default();

        Self {
            provider,
            notifier,
            navigator,
            show_delivery: false,
            delivery_form,
            on_checkout_success: None,
        }
    }

    /// Run `hook` after every successful checkout (for example to clear the cart).
    #[must_use]
    pub fn with_checkout_hook(mut self, hook: CheckoutHook) -> Self {
        self.on_checkout_success = Some(hook);
        self
    }

    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Current cart contents.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.provider.cart_items()
    }

    /// Totals and counts for the current contents.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::TotalOverflow`] if the total cannot be
    /// computed.
    pub fn summary(&self) -> Result<CartSummary, CheckoutError> {
        CartSummary::from_items(&self.provider.cart_items())
    }

    /// Whether the delivery form is displayed.
    #[must_use]
    pub const fn show_delivery(&self) -> bool {
        self.show_delivery
    }

    #[must_use]
    pub const fn delivery_form(&self) -> &DeliveryForm {
        &self.delivery_form
    }

    /// Form state, for field edits.
    pub fn delivery_form_mut(&mut self) -> &mut DeliveryForm {
        &mut self.delivery_form
    }

    /// Show the delivery form, prefilled from the saved record if there is one.
    pub fn open_delivery_form(&mut self) {
        if let Some(info) = self.provider.delivery_info() {
            self.delivery_form = DeliveryForm::from(&info);
        }
        self.show_delivery = true;
    }

    /// Hide the delivery form. Unsaved edits are kept.
    pub fn close_delivery_form(&mut self) {
        self.show_delivery = false;
    }

    /// Request a new quantity for an item.
    ///
    /// Service quantities never change; the attempt is refused with an
    /// informational notice. A product quantity below one is ignored without
    /// a notice. Neither case reaches the store.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Quantity`] with the refusal reason, or a store
    /// error if the update itself fails.
    #[instrument(skip(self), fields(key = %key))]
    pub fn handle_quantity_change(&self, key: ItemKey, new_quantity: i64) -> Result<(), CartError> {
        if key.kind == ItemKind::Service {
            self.notifier.info(SERVICE_QUANTITY_FIXED);
            return Err(QuantityChangeRejected::FixedServiceQuantity.into());
        }

        if new_quantity < 1 {
            debug!("Ignoring quantity below 1");
            return Err(QuantityChangeRejected::BelowMinimum {
                requested: new_quantity,
            }
            .into());
        }

        let item = self.find(key)?;
        let quantity = match item.check_quantity(new_quantity) {
            Ok(quantity) => quantity,
            Err(rejected) => {
                self.notifier.error(&rejected.to_string());
                return Err(rejected.into());
            }
        };

        self.provider
            .update_quantity(key, quantity)
            .inspect_err(|e| self.notifier.error(&e.to_string()))
    }

    /// Increase an item's quantity by one.
    ///
    /// # Errors
    ///
    /// See [`CartPage::handle_quantity_change`].
    pub fn increment(&self, key: ItemKey) -> Result<(), CartError> {
        let current = self.current_quantity(key)?;
        self.handle_quantity_change(key, current + 1)
    }

    /// Decrease an item's quantity by one.
    ///
    /// # Errors
    ///
    /// See [`CartPage::handle_quantity_change`].
    pub fn decrement(&self, key: ItemKey) -> Result<(), CartError> {
        let current = self.current_quantity(key)?;
        self.handle_quantity_change(key, current - 1)
    }

    /// Remove an item. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns a store error if removal fails.
    #[instrument(skip(self), fields(key = %key))]
    pub fn handle_remove(&self, key: ItemKey) -> Result<bool, CartError> {
        match self.provider.remove_from_cart(key) {
            Ok(true) => {
                self.notifier.success(ITEM_REMOVED);
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                self.notifier.error(&e.to_string());
                Err(e)
            }
        }
    }

    /// Attempt checkout.
    ///
    /// An empty cart is refused. A cart with products and no saved delivery
    /// record is refused and the delivery form is revealed. Otherwise the
    /// checkout hook runs with the receipt.
    ///
    /// # Errors
    ///
    /// Returns the [`CheckoutError`] that blocked checkout.
    #[instrument(skip(self))]
    pub fn handle_checkout(&mut self) -> Result<CheckoutReceipt, CheckoutError> {
        let receipt = match checkout::gate(self.provider.cart_items(), self.provider.delivery_info())
        {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(error = %e, "Checkout blocked");
                self.notifier.error(&e.to_string());
                if e == CheckoutError::MissingDeliveryInfo {
                    self.open_delivery_form();
                }
                return Err(e);
            }
        };

        info!(
            total = %receipt.summary.total,
            products = receipt.summary.products_count,
            services = receipt.summary.services_count,
            "Checkout"
        );
        self.notifier.success(ORDER_PLACED);
        if let Some(hook) = &self.on_checkout_success {
            hook(&receipt);
        }
        Ok(receipt)
    }

    /// Save the delivery form.
    ///
    /// The whole record is replaced and the form is closed. An incomplete
    /// form is refused and stays open.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidDelivery`] naming the first empty field,
    /// or a store error if saving fails.
    #[instrument(skip(self))]
    pub fn handle_delivery_submit(&mut self) -> Result<DeliveryInfo, CartError> {
        let info = match self.delivery_form.to_info() {
            Ok(info) => info,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return Err(e.into());
            }
        };

        if let Err(e) = self.provider.save_delivery_info(info.clone()) {
            self.notifier.error(&e.to_string());
            return Err(e);
        }

        self.show_delivery = false;
        self.notifier.success(DELIVERY_SAVED);
        debug!(mode = %info.mode(), "Delivery form submitted");
        Ok(info)
    }

    /// Leave the cart page.
    pub fn go_back(&self) {
        self.navigator.back();
    }

    fn find(&self, key: ItemKey) -> Result<CartItem, CartError> {
        self.provider
            .cart_items()
            .into_iter()
            .find(|item| item.key() == key)
            .ok_or_else(|| {
                warn!(key = %key, "Item not in cart");
                CartError::ItemNotFound(key)
            })
    }

    fn current_quantity(&self, key: ItemKey) -> Result<i64, CartError> {
        self.find(key).map(|item| i64::from(item.quantity()))
    }
}
