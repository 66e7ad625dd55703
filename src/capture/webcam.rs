use super::CaptureSource;
use anyhow::{anyhow, Context, Result};
use image::RgbImage;
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;

pub struct WebcamCapture {
    camera: Camera,
    device_index: u32,
    released: bool,
}

impl WebcamCapture {
    pub fn open(device_index: u32) -> Result<Self> {
        tracing::info!("Opening camera {}", device_index);

        let index = CameraIndex::Index(device_index);
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);

        let mut camera = Camera::new(index, requested)
            .with_context(|| format!("Failed to open camera {}", device_index))?;

        camera
            .open_stream()
            .with_context(|| format!("Failed to open stream for camera {}", device_index))?;

        let resolution = camera.resolution();
        tracing::info!(
            "Camera {} streaming at {}x{}",
            device_index,
            resolution.width(),
            resolution.height()
        );

        Ok(Self {
            camera,
            device_index,
            released: false,
        })
    }
}

impl CaptureSource for WebcamCapture {
    fn read(&mut self) -> Result<RgbImage> {
        if self.released {
            return Err(anyhow!("camera {} already released", self.device_index));
        }

        let frame = self
            .camera
            .frame()
            .with_context(|| format!("Failed to grab frame from camera {}", self.device_index))?;

        // Device buffers arrive as MJPEG or YUYV depending on the driver
        let decoded = frame
            .decode_image::<RgbFormat>()
            .context("Failed to decode frame")?;

        let (width, height) = decoded.dimensions();
        RgbImage::from_raw(width, height, decoded.into_raw())
            .context("Decoded frame has an unexpected buffer size")
    }

    fn is_open(&self) -> bool {
        !self.released && self.camera.is_stream_open()
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match self.camera.stop_stream() {
            Ok(()) => tracing::info!("Camera {} released", self.device_index),
            Err(e) => tracing::warn!("Camera {} did not stop cleanly: {}", self.device_index, e),
        }
    }
}

impl Drop for WebcamCapture {
    fn drop(&mut self) {
        self.release();
    }
}
