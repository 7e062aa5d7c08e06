//! Back navigation out of the cart page.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Navigates to the previous screen.
pub trait Navigator: Send + Sync {
    fn back(&self);
}

/// Navigator that counts back navigations. Clones share the count.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    back_count: Arc<AtomicUsize>,
}

impl NavigationHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `back` has been called.
    #[must_use]
    pub fn back_count(&self) -> usize {
        self.back_count.load(Ordering::Relaxed)
    }
}

impl Navigator for NavigationHistory {
    fn back(&self) {
        self.back_count.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Navigate back");
    }
}
