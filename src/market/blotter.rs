//! Blotter: the live-order store for one market.
//!
//! ## Storage
//!
//! Orders live in a slab (O(1) insert/remove/lookup) with an id index, the
//! same layout the order book uses for resting orders. Every slot carries a
//! placement sequence number so iteration always follows placement order,
//! even after slab keys have been reused.
//!
//! ## Live Orders
//!
//! An order is live until it reaches a terminal status
//! ([`OrderStatus::is_terminal`](crate::types::OrderStatus::is_terminal)).
//! Finished orders stay in the blotter until [`Blotter::remove_complete`]
//! hands them back to the caller.

use std::collections::HashMap;

use slab::Slab;

use crate::error::OrderError;
use crate::order::SimulatedOrder;
use crate::types::OrderId;

#[derive(Debug, Clone)]
struct Slot<O> {
    /// Placement sequence number
    seq: u64,
    order: O,
}

/// Orders placed on one market.
#[derive(Debug, Clone)]
pub struct Blotter<O> {
    /// Pre-allocated order storage
    orders: Slab<Slot<O>>,

    /// Order ID to slab key mapping
    index: HashMap<OrderId, usize>,

    /// Next placement sequence number
    next_seq: u64,
}

impl<O> Default for Blotter<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O> Blotter<O> {
    /// Create an empty blotter
    pub fn new() -> Self {
        Self {
            orders: Slab::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Create a blotter with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            orders: Slab::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Number of orders held, live or finished
    #[inline]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Check if the blotter holds no orders
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl<O: SimulatedOrder> Blotter<O> {
    /// Add an order.
    ///
    /// # Errors
    ///
    /// [`OrderError::Duplicate`] if an order with the same id is present.
    pub fn insert(&mut self, order: O) -> Result<(), OrderError> {
        let id = order.id();
        if self.index.contains_key(&id) {
            return Err(OrderError::Duplicate(id));
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let key = self.orders.insert(Slot { seq, order });
        self.index.insert(id, key);
        Ok(())
    }

    /// Look up an order by id
    pub fn get(&self, id: OrderId) -> Option<&O> {
        let key = *self.index.get(&id)?;
        self.orders.get(key).map(|slot| &slot.order)
    }

    /// Look up an order by id for mutation
    pub fn get_mut(&mut self, id: OrderId) -> Option<&mut O> {
        let key = *self.index.get(&id)?;
        self.orders.get_mut(key).map(|slot| &mut slot.order)
    }

    /// Orders not yet in a terminal status, in placement order
    pub fn live_orders(&self) -> impl Iterator<Item = &O> {
        let mut live: Vec<&Slot<O>> = self
            .orders
            .iter()
            .map(|(_, slot)| slot)
            .filter(|slot| !slot.order.status().is_terminal())
            .collect();
        live.sort_unstable_by_key(|slot| slot.seq);
        live.into_iter().map(|slot| &slot.order)
    }

    /// Orders not yet in a terminal status, in placement order, mutably
    pub fn live_orders_mut(&mut self) -> impl Iterator<Item = &mut O> {
        let mut live: Vec<&mut Slot<O>> = self
            .orders
            .iter_mut()
            .map(|(_, slot)| slot)
            .filter(|slot| !slot.order.status().is_terminal())
            .collect();
        live.sort_unstable_by_key(|slot| slot.seq);
        live.into_iter().map(|slot| &mut slot.order)
    }

    /// Remove and return every finished order, in placement order
    pub fn remove_complete(&mut self) -> Vec<O> {
        let mut keys: Vec<(u64, usize)> = self
            .orders
            .iter()
            .filter(|(_, slot)| slot.order.status().is_terminal())
            .map(|(key, slot)| (slot.seq, key))
            .collect();
        keys.sort_unstable();

        keys.into_iter()
            .map(|(_, key)| {
                let slot = self.orders.remove(key);
                self.index.remove(&slot.order.id());
                slot.order
            })
            .collect()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
