//! Per-camera capture state and the capture action.
//!
//! Everything here runs on the UI thread. The window calls into the
//! [`Controller`] from its event handlers and from the preview tick, one call
//! at a time.

mod category;
mod counter;

pub use category::{is_valid_label, Category};
pub use counter::{CounterError, FrameCounter};

use crate::capture::CaptureSource;
use crate::output::{DirectoryChooser, FileNaming, OutputSink};
use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// What a capture trigger does when a label is invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Validate every label before touching any camera
    #[default]
    AllOrNothing,
    /// Validate and write camera by camera; the first invalid label stops the
    /// batch and earlier cameras stay written
    StopAtFirstInvalid,
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no save directory chosen")]
    OutputDirectoryUnset,

    #[error(
        "camera {camera}: {label:?} is not a valid expression (valid: {})",
        Category::allowed_list()
    )]
    InvalidLabel { camera: u32, label: String },

    #[error("failed to create directory {}", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("camera {camera}: failed to save image")]
    Write {
        camera: u32,
        #[source]
        source: anyhow::Error,
    },
}

/// Outcome of one capture trigger
#[derive(Debug, Default)]
pub struct CaptureReport {
    pub saved: Vec<PathBuf>,
    /// Cameras whose frame grab failed; their counters are unchanged
    pub failed_reads: Vec<u32>,
}

/// One physical camera and the operator inputs that belong to it
pub struct CameraSlot {
    index: u32,
    source: Option<Box<dyn CaptureSource>>,
    label: String,
    counter: FrameCounter,
    reading: bool,
}

impl CameraSlot {
    pub fn new(index: u32, source: Option<Box<dyn CaptureSource>>) -> Self {
        Self {
            index,
            source,
            label: String::new(),
            counter: FrameCounter::default(),
            reading: true,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn counter(&self) -> u32 {
        self.counter.value()
    }

    pub fn is_open(&self) -> bool {
        self.source.as_ref().is_some_and(|source| source.is_open())
    }

    fn read(&mut self) -> anyhow::Result<RgbImage> {
        match self.source.as_mut() {
            Some(source) => source.read(),
            None => Err(anyhow::anyhow!("camera {} is not open", self.index)),
        }
    }

    fn release(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
        }
    }
}

/// Owns every camera slot, the output directory and the frame writer
pub struct Controller {
    slots: Vec<CameraSlot>,
    output_dir: Option<PathBuf>,
    naming: FileNaming,
    policy: BatchPolicy,
    sink: Box<dyn OutputSink>,
}

impl Controller {
    pub fn new(
        slots: Vec<CameraSlot>,
        naming: FileNaming,
        policy: BatchPolicy,
        sink: Box<dyn OutputSink>,
    ) -> Self {
        Self {
            slots,
            output_dir: None,
            naming,
            policy,
            sink,
        }
    }

    pub fn slots(&self) -> &[CameraSlot] {
        &self.slots
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    pub fn set_output_dir(&mut self, dir: PathBuf) {
        tracing::info!("Save directory set to: {}", dir.display());
        self.output_dir = Some(dir);
    }

    /// Run the chooser; cancelling keeps whatever was set before
    pub fn choose_output_dir(&mut self, chooser: &mut dyn DirectoryChooser) -> Option<&Path> {
        match chooser.choose() {
            Some(dir) => self.set_output_dir(dir),
            None => tracing::info!("Directory selection cancelled"),
        }
        self.output_dir()
    }

    /// Record a label edit. Every edit event resets the camera's counter,
    /// even when the text ends up unchanged.
    pub fn label_edited(&mut self, slot: usize, text: &str) {
        let Some(slot) = self.slots.get_mut(slot) else {
            return;
        };
        slot.label.clear();
        slot.label.push_str(text);
        slot.counter.reset();
        tracing::debug!("Camera {} label changed, counter reset to 1", slot.index);
    }

    pub fn set_counter(&mut self, slot: usize, input: &str) -> Result<u32, CounterError> {
        let Some(slot) = self.slots.get_mut(slot) else {
            return Err(CounterError::UnknownCamera(slot));
        };
        let value = slot.counter.set_manually(input)?;
        tracing::info!("Camera {} counter manually set to: {}", slot.index, value);
        Ok(value)
    }

    /// Grab one frame per open camera for the preview surfaces.
    ///
    /// Failed reads are skipped so the previous preview stays up. A camera
    /// that starts failing is logged once, and again when it recovers.
    pub fn read_previews(&mut self) -> Vec<(usize, RgbImage)> {
        let mut frames = Vec::with_capacity(self.slots.len());
        for (position, slot) in self.slots.iter_mut().enumerate() {
            if slot.source.is_none() {
                continue;
            }
            match slot.read() {
                Ok(frame) => {
                    if !slot.reading {
                        tracing::info!("Camera {} is delivering frames again", slot.index);
                        slot.reading = true;
                    }
                    frames.push((position, frame));
                }
                Err(e) => {
                    if slot.reading {
                        tracing::warn!("Camera {} preview read failed: {:#}", slot.index, e);
                        slot.reading = false;
                    }
                }
            }
        }
        frames
    }

    /// Save one frame per camera under `<output_dir>/<label>/`.
    pub fn capture(&mut self) -> Result<CaptureReport, CaptureError> {
        let root = self
            .output_dir
            .clone()
            .ok_or(CaptureError::OutputDirectoryUnset)?;

        if self.policy == BatchPolicy::AllOrNothing {
            for slot in &self.slots {
                validate(slot)?;
            }
        }

        let mut report = CaptureReport::default();
        for slot in &mut self.slots {
            let category = match validate(slot) {
                Ok(category) => category,
                Err(e) => {
                    if !report.saved.is_empty() {
                        tracing::warn!(
                            "Capture stopped at camera {}; {} image(s) already saved",
                            slot.index,
                            report.saved.len()
                        );
                    }
                    return Err(e);
                }
            };

            let dir = root.join(category.as_str());
            std::fs::create_dir_all(&dir).map_err(|source| CaptureError::CreateDirectory {
                path: dir.clone(),
                source,
            })?;

            let frame = match slot.read() {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!(
                        "Failed to capture image from camera {}: {:#}",
                        slot.index,
                        e
                    );
                    report.failed_reads.push(slot.index);
                    continue;
                }
            };

            let path = dir.join(self.naming.file_name(slot.index, slot.counter.value()));
            self.sink
                .write_frame(&path, &frame)
                .map_err(|source| CaptureError::Write {
                    camera: slot.index,
                    source,
                })?;

            tracing::info!("Saved image: {}", path.display());
            slot.counter.increment();
            report.saved.push(path);
        }

        Ok(report)
    }

    /// Release every camera. Safe to call more than once.
    pub fn shutdown(&mut self) {
        for slot in &mut self.slots {
            slot.release();
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn validate(slot: &CameraSlot) -> Result<Category, CaptureError> {
    Category::parse(&slot.label).ok_or_else(|| CaptureError::InvalidLabel {
        camera: slot.index,
        label: slot.label.clone(),
    })
}
