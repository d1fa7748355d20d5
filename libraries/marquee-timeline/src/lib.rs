//! Marquee Player - Timeline Store
//!
//! The in-memory model behind the playlist authoring surface: an ordered,
//! heterogeneous item sequence with mutation operations, subscriber
//! notifications, and conversion to/from the persisted wire shape.
//!
//! The store performs no I/O. Asynchronous work (duration probing,
//! thumbnail capture) is kicked off by the caller using the id returned
//! from [`TimelineStore::add_item`].
//!
//! # Example
//!
//! ```rust
//! use marquee_core::types::{ItemContent, ItemDraft};
//! use marquee_timeline::TimelineStore;
//!
//! let mut store = TimelineStore::new();
//! let id = store.add_item(ItemDraft::new(
//!     ItemContent::Image,
//!     "https://cdn.example.com/a.jpg",
//!     "Poster A",
//! ));
//!
//! store.update_duration(&id, 15).unwrap();
//! assert_eq!(store.total_duration_secs(), 15);
//! ```

mod error;
mod events;
mod persist;
mod store;

pub use error::{Result, TimelineError};
pub use events::TimelineEvent;
pub use store::TimelineStore;
