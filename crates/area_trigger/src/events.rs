//! Map-changed notification source.
//!
//! Hosts own a [`MapChangedEvent`] and call [`MapChangedEvent::notify`]
//! whenever the active map switches. Consumers subscribe with a listener and
//! keep the returned [`Subscription`] alive for as long as they want to hear
//! about it; dropping the guard unsubscribes.
//!
//! ```
//! use area_trigger::{MapChangedEvent, PositionSample};
//! use glam::DVec3;
//!
//! let event = MapChangedEvent::new();
//! let subscription = event.subscribe(|sample: &PositionSample| {
//!   println!("now on {}", sample.map_id);
//! });
//! assert_eq!(event.subscriber_count(), 1);
//!
//! event.notify(&PositionSample::new(2, DVec3::ZERO));
//! drop(subscription);
//! assert_eq!(event.subscriber_count(), 0);
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::tracker::PositionSample;

type Listener = Arc<dyn Fn(&PositionSample) + Send + Sync>;

#[derive(Default)]
struct Registry {
  next_id: u64,
  listeners: Vec<(u64, Listener)>,
}

/// Cloneable handle to a shared listener list.
#[derive(Clone, Default)]
pub struct MapChangedEvent {
  registry: Arc<Mutex<Registry>>,
}

impl MapChangedEvent {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register `listener`. It stays registered until the returned guard drops.
  #[must_use = "dropping the subscription unsubscribes immediately"]
  pub fn subscribe<F>(&self, listener: F) -> Subscription
  where
    F: Fn(&PositionSample) + Send + Sync + 'static,
  {
    let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
    let id = registry.next_id;
    registry.next_id += 1;
    registry.listeners.push((id, Arc::new(listener)));

    Subscription {
      id,
      registry: Arc::downgrade(&self.registry),
    }
  }

  /// Invoke every listener synchronously, in subscription order.
  ///
  /// The list is copied first, so listeners may subscribe or drop
  /// subscriptions while being notified.
  pub fn notify(&self, sample: &PositionSample) {
    let snapshot: Vec<Listener> = {
      let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
      registry.listeners.iter().map(|(_, l)| l.clone()).collect()
    };
    for listener in snapshot {
      listener(sample);
    }
  }

  pub fn subscriber_count(&self) -> usize {
    self
      .registry
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .listeners
      .len()
  }
}

impl fmt::Debug for MapChangedEvent {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MapChangedEvent")
      .field("subscribers", &self.subscriber_count())
      .finish()
  }
}

/// Unsubscribes its listener on drop.
///
/// Holds only a weak reference, so a subscription may outlive the event.
pub struct Subscription {
  id: u64,
  registry: Weak<Mutex<Registry>>,
}

impl Subscription {
  /// False once the event itself has been dropped.
  pub fn is_active(&self) -> bool {
    self.registry.strong_count() > 0
  }
}

impl Drop for Subscription {
  fn drop(&mut self) {
    let Some(registry) = self.registry.upgrade() else {
      return;
    };
    let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
    registry.listeners.retain(|(id, _)| *id != self.id);
  }
}

impl fmt::Debug for Subscription {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Subscription")
      .field("id", &self.id)
      .field("active", &self.is_active())
      .finish()
  }
}
