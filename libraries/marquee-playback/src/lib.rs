//! Marquee Player - Playback scheduling
//!
//! Drives a playlist sequence for preview/playback:
//!
//! - [`PlaybackScheduler`]: the state machine walking the item sequence,
//!   arming exactly one advance trigger per item (a wall-clock timer for
//!   images/websites/integrations, the media's end-of-playback signal for
//!   videos), with a manual-next control and clean cancellation.
//! - [`Prefetcher`]: warms the client media cache for the next item's
//!   resolved asset while the current one plays.
//! - [`CachingResolver`]: expiring LRU cache over any
//!   [`marquee_core::UrlResolver`], guaranteeing the raw-URL fallback at
//!   every call site.
//!
//! # Example
//!
//! ```ignore
//! let scheduler = PlaybackScheduler::new(store.items().to_vec(), resolver);
//! let (handle, mut events) = scheduler.start();
//!
//! while let Some(event) = events.recv().await {
//!     match event {
//!         SchedulerEvent::ItemStarted { index, .. } => show(index),
//!         SchedulerEvent::Ended => break,
//!         _ => {}
//!     }
//! }
//! handle.close();
//! ```

mod error;
mod events;
mod prefetch;
mod resolver;
mod scheduler;

pub use error::{PlaybackError, Result};
pub use events::SchedulerEvent;
pub use prefetch::Prefetcher;
pub use resolver::CachingResolver;
pub use scheduler::{PlaybackScheduler, PlaybackState, PlayerHandle};
