mod webcam;

#[cfg(test)]
pub mod fake;

pub use webcam::WebcamCapture;

use anyhow::Result;
use image::RgbImage;

/// Trait for camera capture sources
pub trait CaptureSource {
    /// Grab the next frame, decoded to RGB.
    ///
    /// An error means the device disconnected or had no frame ready. Callers
    /// log it and move on.
    fn read(&mut self) -> Result<RgbImage>;

    /// Whether the device stream is still open
    fn is_open(&self) -> bool;

    /// Stop the stream. Releasing twice is a no-op.
    fn release(&mut self);
}
