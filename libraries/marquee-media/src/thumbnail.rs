//! First-frame thumbnail capture
//!
//! Authoring-time posters for video items: decode one frame shortly after
//! the start (frame zero is often black), encode it as a JPEG, and hand
//! back a data URL the UI can drop straight into an image source. A load
//! error rejects; the caller falls back to a supplied thumbnail URL or the
//! raw asset URL.

use crate::error::{MediaError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use marquee_core::{FrameGrabber, RawFrame};
use std::io::Cursor;
use tracing::debug;

/// Seek offset for the captured frame, in seconds
///
/// Skips past the black/blank frame many encoders put at 0.0.
pub const CAPTURE_SEEK_SECS: f64 = 0.1;

/// JPEG quality on the encoder's 1-100 scale (0.8 of full quality)
pub const JPEG_QUALITY: u8 = 80;

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Captures a video's first decoded frame as a JPEG data URL
pub struct ThumbnailCapture<G> {
    grabber: G,
}

impl<G: FrameGrabber> ThumbnailCapture<G> {
    /// Capture over the given frame grabber
    pub fn new(grabber: G) -> Self {
        Self { grabber }
    }

    /// Produce a `data:image/jpeg;base64,...` string for the video at `url`
    ///
    /// The frame is taken at [`CAPTURE_SEEK_SECS`] at the video's native
    /// dimensions. No retries.
    pub async fn capture_first_frame(&self, url: &str) -> Result<String> {
        let frame = self
            .grabber
            .grab_frame(url, CAPTURE_SEEK_SECS)
            .await
            .map_err(|e| MediaError::CaptureFailed(e.to_string()))?;

        debug!(url, width = frame.width, height = frame.height, "captured first frame");
        encode_jpeg_data_url(&frame)
    }
}

fn encode_jpeg_data_url(frame: &RawFrame) -> Result<String> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.pixels.len() != expected {
        return Err(MediaError::CaptureFailed(format!(
            "frame buffer is {} bytes, expected {expected}",
            frame.pixels.len()
        )));
    }

    // JPEG carries no alpha channel
    let rgb: Vec<u8> = frame
        .pixels
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(Cursor::new(&mut jpeg), JPEG_QUALITY).encode(
        &rgb,
        frame.width,
        frame.height,
        ExtendedColorType::Rgb8,
    )?;

    Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(&jpeg)))
}
