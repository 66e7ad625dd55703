use super::OutputSink;
use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use std::path::Path;

/// Writes frames as JPEG files at the encoder's default quality
#[derive(Debug, Default)]
pub struct JpegFileOutput;

impl OutputSink for JpegFileOutput {
    fn write_frame(&mut self, path: &Path, frame: &RgbImage) -> Result<()> {
        if path.exists() {
            tracing::warn!("Overwriting existing image {}", path.display());
        }

        frame
            .save_with_format(path, ImageFormat::Jpeg)
            .with_context(|| format!("Failed to write JPEG to {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn writes_a_decodable_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.jpg");
        let frame = RgbImage::from_pixel(16, 12, Rgb([10, 200, 30]));

        JpegFileOutput.write_frame(&path, &frame).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 12));
    }

    #[test]
    fn replaces_an_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1.jpg");
        std::fs::write(&path, b"stale").unwrap();

        JpegFileOutput
            .write_frame(&path, &RgbImage::new(4, 4))
            .unwrap();

        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn missing_parent_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("1.jpg");

        assert!(JpegFileOutput.write_frame(&path, &RgbImage::new(4, 4)).is_err());
    }
}
