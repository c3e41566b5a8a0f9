//! In-memory order cache joining the orders list to the order detail view.
//!
//! The detail view cannot re-fetch a single order, so the list caches every
//! record it shows under its `id` before navigating.

use std::collections::HashMap;

use crate::orders::CanonicalOrder;

#[derive(Debug, Clone, Default)]
pub struct OrderCache {
    orders: HashMap<String, CanonicalOrder>,
}

impl OrderCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caches `order` under its id, replacing any earlier record.
    pub fn insert(&mut self, order: CanonicalOrder) {
        self.orders.insert(order.id.clone(), order);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CanonicalOrder> {
        self.orders.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl Extend<CanonicalOrder> for OrderCache {
    fn extend<I: IntoIterator<Item = CanonicalOrder>>(&mut self, iter: I) {
        for order in iter {
            self.insert(order);
        }
    }
}

impl FromIterator<CanonicalOrder> for OrderCache {
    fn from_iter<I: IntoIterator<Item = CanonicalOrder>>(iter: I) -> Self {
        let mut cache = Self::new();
        cache.extend(iter);
        cache
    }
}
