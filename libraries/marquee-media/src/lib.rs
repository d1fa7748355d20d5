//! Marquee Player - Media probing
//!
//! Asynchronous media inspection for the playlist authoring flow:
//!
//! - [`DurationProbe`]: determines a video's playback length in whole
//!   seconds by trying cross-origin strategies in order under a hard
//!   deadline, with a safe fallback when every strategy fails to load.
//! - [`ThumbnailCapture`]: rasterizes a video's first decoded frame into a
//!   JPEG data URL for authoring-time display.
//!
//! Both work over the narrow collaborator traits in `marquee-core`
//! ([`marquee_core::MediaMetadataSource`], [`marquee_core::FrameGrabber`]),
//! so a browser binding and a native decoder can satisfy them equally.

mod error;
mod probe;
mod thumbnail;

pub use error::{MediaError, Result};
pub use probe::{DurationProbe, FALLBACK_DURATION_SECS, PROBE_DEADLINE};
pub use thumbnail::{ThumbnailCapture, CAPTURE_SEEK_SECS, JPEG_QUALITY};
