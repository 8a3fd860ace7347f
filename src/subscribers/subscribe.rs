//! # Subscriber trait
//!
//! `Subscribe` is the extension point for observing host lifecycle events. Each
//! subscriber is driven by a dedicated worker fed by a bounded queue owned by the
//! [`SubscriberSet`](crate::subscribers::SubscriberSet).
//!
//! ## Contract
//! - Implementations may be slow; they never block the control task nor other subscribers.
//! - Each subscriber declares its queue capacity via [`Subscribe::queue_capacity`].
//!   On overflow, events for that subscriber are **dropped** and reported as
//!   [`EventKind::SubscriberOverflow`](crate::EventKind::SubscriberOverflow).
//!
//! ## Example
//! ```rust
//! use hostvisor::{Event, EventKind, Subscribe};
//!
//! struct RelaunchAudit;
//!
//! #[async_trait::async_trait]
//! impl Subscribe for RelaunchAudit {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::RelaunchIssued {
//!             // write audit record...
//!         }
//!     }
//!     fn name(&self) -> &'static str { "relaunch-audit" }
//!     fn queue_capacity(&self) -> usize { 64 }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated worker task.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Preferred capacity of this subscriber's queue.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
