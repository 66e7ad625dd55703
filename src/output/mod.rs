mod chooser;
mod jpeg;

pub use chooser::{DirectoryChooser, NativeDirectoryChooser};
pub use jpeg::JpegFileOutput;

use anyhow::Result;
use image::RgbImage;
use std::path::Path;

/// Trait for saved-frame destinations
pub trait OutputSink {
    /// Write a frame to `path`, replacing any existing file
    fn write_frame(&mut self, path: &Path, frame: &RgbImage) -> Result<()>;
}

/// How saved frames are named inside a category folder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileNaming {
    /// `<counter>.jpg`
    Counter,
    /// `camera_<index>_<counter>.jpg`
    CameraPrefixed,
}

impl FileNaming {
    pub fn file_name(self, camera: u32, counter: u32) -> String {
        match self {
            FileNaming::Counter => format!("{}.jpg", counter),
            FileNaming::CameraPrefixed => format!("camera_{}_{}.jpg", camera, counter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_camera_names_use_counter_only() {
        assert_eq!(FileNaming::Counter.file_name(0, 1), "1.jpg");
        assert_eq!(FileNaming::Counter.file_name(3, 42), "42.jpg");
    }

    #[test]
    fn multi_camera_names_carry_the_camera_index() {
        assert_eq!(FileNaming::CameraPrefixed.file_name(0, 1), "camera_0_1.jpg");
        assert_eq!(FileNaming::CameraPrefixed.file_name(2, 17), "camera_2_17.jpg");
    }
}
