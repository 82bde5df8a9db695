//! Snapshot subscriptions.
//!
//! Subscribers are called with a fresh `DashboardSnapshot` after every
//! selection change. Notification order between subscribers is unspecified.

use crate::snapshot::DashboardSnapshot;
use hashbrown::HashMap;

/// Unique identifier for a subscription.
pub type SubscriptionId = u64;

/// Callback type for snapshot notifications.
pub type SnapshotCallback = Box<dyn Fn(&DashboardSnapshot)>;

/// Manages the subscribers of one dashboard.
pub struct SubscriptionManager {
    subscriptions: HashMap<SubscriptionId, SnapshotCallback>,
    next_id: SubscriptionId,
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionManager {
    /// Creates a new subscription manager.
    pub fn new() -> Self {
        Self {
            subscriptions: HashMap::new(),
            next_id: 1,
        }
    }

    /// Registers a callback and returns its ID.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&DashboardSnapshot) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.subscriptions.insert(id, Box::new(callback));
        id
    }

    /// Unsubscribes by ID.
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscriptions.remove(&id).is_some()
    }

    /// Calls every subscriber with the snapshot.
    pub fn notify_all(&self, snapshot: &DashboardSnapshot) {
        for callback in self.subscriptions.values() {
            callback(snapshot);
        }
    }

    /// Returns the number of subscriptions.
    #[inline]
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Returns true if there are no subscriptions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
