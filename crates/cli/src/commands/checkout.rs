//! Run checkout against a cart file.

use std::sync::Arc;

use marketplace_cart::{CartPage, CartSummary, NavigationHistory, TracingNotifier};
use marketplace_core::{CurrencyCode, DeliveryMode};
use tracing::info;

/// Delivery fields given on the command line.
#[derive(Debug, Default)]
pub struct DeliveryArgs {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub mode: DeliveryMode,
}

impl DeliveryArgs {
    const fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none() && self.phone.is_none()
    }
}

/// Load a cart, optionally submit the delivery form, and check out.
///
/// Notices go to the log as they are raised. The cart is cleared once
/// checkout succeeds.
///
/// # Errors
///
/// Returns an error if the cart cannot be loaded, its total cannot be
/// computed, the delivery form is incomplete, or checkout is refused.
pub async fn run(
    file_path: &str,
    delivery: DeliveryArgs,
    currency: CurrencyCode,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = super::load_cart(file_path).await?;

    let mut page = CartPage::new(
        store.clone(),
        Arc::new(TracingNotifier),
        Arc::new(NavigationHistory::new()),
    )
    .with_checkout_hook(store.clear_on_checkout());

    super::summary::log_summary(&store, &page.summary()?, currency);

    let mut result: Result<(), Box<dyn std::error::Error>> = Ok(());
    if !delivery.is_empty() {
        page.open_delivery_form();
        let form = page.delivery_form_mut();
        form.name = delivery.name.unwrap_or_default();
        form.address = delivery.address.unwrap_or_default();
        form.phone = delivery.phone.unwrap_or_default();
        form.mode = delivery.mode;
        if let Err(e) = page.handle_delivery_submit() {
            result = Err(e.into());
        }
    }

    if result.is_ok() {
        result = match page.handle_checkout() {
            Ok(receipt) => {
                report_receipt(&receipt.summary, currency);
                Ok(())
            }
            Err(e) => Err(e.into()),
        };
    }

    if page.show_delivery() {
        info!("Delivery information is required: pass --name, --address and --phone");
    }

    result
}

fn report_receipt(summary: &CartSummary, currency: CurrencyCode) {
    info!(
        lines = summary.products_count + summary.services_count,
        total = %summary.total_price(currency),
        "Checkout complete"
    );
}
