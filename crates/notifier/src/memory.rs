use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::Order;

use crate::{OrderPublisher, PublishError, Result, message};

#[derive(Debug, Default)]
struct InMemoryPublisherState {
    published: Vec<Order>,
    bodies: Vec<Vec<u8>>,
    attempts: usize,
    fail_on_publish: bool,
}

/// In-memory order publisher for testing.
///
/// Records every order it is asked to announce, along with the encoded body a
/// broker would have received. Failures can be scripted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderPublisher {
    state: Arc<RwLock<InMemoryPublisherState>>,
}

impl InMemoryOrderPublisher {
    /// Creates a new in-memory publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the publisher to fail on every publish call until reset.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_on_publish = fail;
    }

    /// Returns the orders published so far, oldest first.
    pub fn published(&self) -> Vec<Order> {
        self.state.read().unwrap().published.clone()
    }

    /// Returns the encoded message bodies published so far.
    pub fn bodies(&self) -> Vec<Vec<u8>> {
        self.state.read().unwrap().bodies.clone()
    }

    /// Returns the number of successfully published messages.
    pub fn published_count(&self) -> usize {
        self.state.read().unwrap().published.len()
    }

    /// Returns the number of publish calls, including failed ones.
    pub fn attempt_count(&self) -> usize {
        self.state.read().unwrap().attempts
    }
}

#[async_trait]
impl OrderPublisher for InMemoryOrderPublisher {
    async fn publish_created_order(&self, order: &Order) -> Result<()> {
        let body = message::encode(order)?;
        let mut state = self.state.write().unwrap();
        state.attempts += 1;

        if state.fail_on_publish {
            return Err(PublishError::Unavailable("broker unreachable".to_string()));
        }

        state.published.push(order.clone());
        state.bodies.push(body);
        Ok(())
    }
}
