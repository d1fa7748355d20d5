/// Collaborator traits for Marquee Player
///
/// The timeline/playback core never touches a browser, a media pipeline, or
/// the network directly. Platform adapters (a browser binding, a native
/// decoder, an HTTP client) satisfy these narrow seams.
use crate::error::Result;
use crate::types::{AssetId, IntegrationId};
use async_trait::async_trait;

/// Reference to an asset that needs a playable URL
///
/// Carries both the stored asset id (when one exists) and the raw URL every
/// call site falls back to when resolution fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetRef {
    /// Stored asset identifier, if the item came from the library
    pub asset_id: Option<AssetId>,
    /// Canonical raw URL, always usable as a fallback
    pub url: String,
}

impl AssetRef {
    /// Asset reference for a library asset
    pub fn new(asset_id: Option<AssetId>, url: impl Into<String>) -> Self {
        Self {
            asset_id,
            url: url.into(),
        }
    }

    /// Ad-hoc reference with only a raw URL
    pub fn raw(url: impl Into<String>) -> Self {
        Self {
            asset_id: None,
            url: url.into(),
        }
    }
}

/// Resolves a stored asset reference to a currently-playable URL
///
/// Typically backed by a signed-URL issuance service. Implementations may
/// fail; callers must catch the failure and substitute `AssetRef::url`, so a
/// resolver error never propagates past the call site.
#[async_trait]
pub trait UrlResolver: Send + Sync {
    /// Resolve to a playable (possibly time-limited) URL
    async fn resolve(&self, asset: &AssetRef) -> Result<String>;
}

/// Cross-origin mode used when loading media for metadata probing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossOriginMode {
    /// `crossorigin="anonymous"`
    Anonymous,
    /// `crossorigin="use-credentials"`
    UseCredentials,
    /// No crossorigin attribute at all
    None,
}

impl CrossOriginMode {
    /// Attribute value for browser-backed adapters
    pub fn as_attr(self) -> Option<&'static str> {
        match self {
            CrossOriginMode::Anonymous => Some("anonymous"),
            CrossOriginMode::UseCredentials => Some("use-credentials"),
            CrossOriginMode::None => None,
        }
    }
}

/// Metadata reported by a media resource once its headers/moov are loaded
#[derive(Debug, Clone, PartialEq)]
pub struct MediaMetadata {
    /// Raw duration in seconds, floating point
    pub duration_secs: f64,
    /// Native frame width in pixels
    pub width: u32,
    /// Native frame height in pixels
    pub height: u32,
}

/// Loads media metadata for a URL under a given cross-origin mode
///
/// A browser adapter maps this to an out-of-DOM `<video preload=metadata>`;
/// a native signage player maps it to a demuxer probe. An error corresponds
/// to the load-error event for that strategy.
#[async_trait]
pub trait MediaMetadataSource: Send + Sync {
    /// Load metadata, failing if this cross-origin strategy cannot load
    async fn load_metadata(&self, url: &str, mode: CrossOriginMode) -> Result<MediaMetadata>;
}

/// One decoded frame of video, RGBA8, row-major
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// RGBA8 pixel data, `width * height * 4` bytes
    pub pixels: Vec<u8>,
}

/// Decodes a single frame of a video at a given timestamp
///
/// A browser adapter seeks a hidden `<video>` and draws to a canvas; a
/// native adapter seeks a decoder. Load errors reject; there is no retry.
#[async_trait]
pub trait FrameGrabber: Send + Sync {
    /// Grab the frame at `at_secs` from the start, at native dimensions
    async fn grab_frame(&self, url: &str, at_secs: f64) -> Result<RawFrame>;
}

/// Stored integration metadata, used as sync fallback and for widget choice
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationRecord {
    /// App name, e.g. "Weather Pro"
    pub app: String,
    /// App category, if reported
    pub category: Option<String>,
    /// Last-known synced payload
    pub metadata: serde_json::Value,
}

/// External integration sync/metadata service
#[async_trait]
pub trait IntegrationService: Send + Sync {
    /// Trigger a sync and return the (possibly nested) payload
    ///
    /// The payload may be the final data or carry one level of nesting
    /// under a `sync_result` key.
    async fn trigger_sync(&self, id: &IntegrationId) -> Result<serde_json::Value>;

    /// Fetch stored metadata for an integration
    async fn get_metadata(&self, id: &IntegrationId) -> Result<IntegrationRecord>;
}

/// Warms the client media cache for an upcoming asset
///
/// A browser adapter creates an off-DOM `Image`/`video` with
/// `preload=metadata` and never waits for completion.
#[async_trait]
pub trait MediaWarmer: Send + Sync {
    /// Begin loading `url` into the media cache; best effort only
    async fn warm(&self, url: &str) -> Result<()>;
}
