//! Screen projectors.
//!
//! One projector per screen: each subscribes to store queries, exposes
//! derived immutable state through a `watch` channel, and translates user
//! intents into store calls. Projectors receive their [`JobStore`] handle at
//! construction; there is no ambient global store.
//!
//! [`JobStore`]: crate::store::JobStore

/// Detail screen - single-record subscription
pub mod detail;
/// Add/edit screen - locally buffered draft, validated on save
pub mod editor;
/// List screen - search and status filter composition
pub mod list;
