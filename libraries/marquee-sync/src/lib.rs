//! Marquee Player - Integration sync
//!
//! Live "integration" widgets (weather, news, ...) render externally synced
//! data. This crate provides:
//!
//! - [`IntegrationCache`]: a per-item cache of synced payloads with an
//!   at-most-one-concurrent-fetch-per-item guarantee and generation-stamped
//!   writes, keyed by playlist item id (two items referencing the same
//!   integration get independent entries).
//! - [`HttpIntegrationService`]: the reqwest client for the integration
//!   sync/metadata endpoints.
//! - [`WidgetKind`]: app-name based widget selection.

mod cache;
mod client;
mod error;
mod widget;

pub use cache::{IntegrationCache, IntegrationData};
pub use client::HttpIntegrationService;
pub use error::{Result, SyncError};
pub use widget::WidgetKind;
