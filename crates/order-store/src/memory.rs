use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use common::OrderId;
use domain::Order;
use tokio::sync::RwLock;

use crate::{OrderRepository, RepositoryError, Result};

#[derive(Debug, Default)]
struct Scripted {
    fail_on_save: AtomicBool,
    fail_on_find: AtomicBool,
    fail_on_list: AtomicBool,
    fail_on_ping: AtomicBool,
    save_calls: AtomicUsize,
    find_calls: AtomicUsize,
}

/// In-memory order repository for testing.
///
/// Keeps full order snapshots keyed by id and honours the same contract as the
/// PostgreSQL implementation: saves replace the stored snapshot whole, and
/// unknown ids yield `RepositoryError::NotFound`. Failures can be scripted per
/// operation, and calls are counted so tests can assert on side effects.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    scripted: Arc<Scripted>,
}

impl InMemoryOrderRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an order directly, bypassing call counting and scripted failures.
    pub async fn insert(&self, order: Order) {
        self.orders.write().await.insert(order.id().clone(), order);
    }

    /// Returns the stored snapshot for an id, if any.
    pub async fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders.read().await.get(id).cloned()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Configures `save` to fail until reset.
    pub fn set_fail_on_save(&self, fail: bool) {
        self.scripted.fail_on_save.store(fail, Ordering::SeqCst);
    }

    /// Configures `find_by_id` to fail with a non-NotFound error until reset.
    pub fn set_fail_on_find(&self, fail: bool) {
        self.scripted.fail_on_find.store(fail, Ordering::SeqCst);
    }

    /// Configures `list` to fail until reset.
    pub fn set_fail_on_list(&self, fail: bool) {
        self.scripted.fail_on_list.store(fail, Ordering::SeqCst);
    }

    /// Configures `ping` to report the store as unreachable until reset.
    pub fn set_fail_on_ping(&self, fail: bool) {
        self.scripted.fail_on_ping.store(fail, Ordering::SeqCst);
    }

    /// Returns how many times `save` was called, including failed calls.
    pub fn save_count(&self) -> usize {
        self.scripted.save_calls.load(Ordering::SeqCst)
    }

    /// Returns how many times `find_by_id` was called.
    pub fn find_count(&self) -> usize {
        self.scripted.find_calls.load(Ordering::SeqCst)
    }

    /// Clears all orders and resets scripted failures and counters.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
        self.set_fail_on_save(false);
        self.set_fail_on_find(false);
        self.set_fail_on_list(false);
        self.set_fail_on_ping(false);
        self.scripted.save_calls.store(0, Ordering::SeqCst);
        self.scripted.find_calls.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order) -> Result<()> {
        self.scripted.save_calls.fetch_add(1, Ordering::SeqCst);
        if self.scripted.fail_on_save.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("save failed".to_string()));
        }

        order.is_valid()?;

        self.orders
            .write()
            .await
            .insert(order.id().clone(), order.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &OrderId) -> Result<Order> {
        self.scripted.find_calls.fetch_add(1, Ordering::SeqCst);
        if self.scripted.fail_on_find.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("find failed".to_string()));
        }

        self.orders
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.clone()))
    }

    async fn list(&self) -> Result<Vec<Order>> {
        if self.scripted.fail_on_list.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("list failed".to_string()));
        }

        let mut orders: Vec<Order> = self.orders.read().await.values().cloned().collect();
        orders.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(orders)
    }

    async fn ping(&self) -> Result<()> {
        if self.scripted.fail_on_ping.load(Ordering::SeqCst) {
            return Err(RepositoryError::Unavailable("store unreachable".to_string()));
        }
        Ok(())
    }
}
