//! # Event subscribers.
//!
//! Subscribers observe events published on the [`Bus`](crate::events::Bus) without
//! ever touching session state.
//!
//! ```text
//! Controller / Coordinator ── publish(Event) ──► Bus ──► Host listener ──► SubscriberSet
//!                                                                  ┌───────────┼───────────┐
//!                                                                  ▼           ▼           ▼
//!                                                              LogWriter    custom ...   custom
//! ```
//!
//! - [`Subscribe`]: trait implemented by every subscriber
//! - [`SubscriberSet`]: per-subscriber queues and workers with panic isolation
//! - [`LogWriter`]: renders events through `tracing` (feature `logging`)

#[cfg(feature = "logging")]
mod log;
mod set;
mod subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscribe::Subscribe;
