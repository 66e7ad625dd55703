use super::CaptureSource;
use anyhow::{anyhow, Result};
use image::{Rgb, RgbImage};
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Scripted capture source for tests.
///
/// Each read pops the next scripted outcome; once the script runs out every
/// read succeeds with a small solid frame.
pub struct FakeCapture {
    script: VecDeque<bool>,
    open: bool,
    pub reads: Rc<Cell<u32>>,
    pub releases: Rc<Cell<u32>>,
}

impl FakeCapture {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            open: true,
            reads: Rc::new(Cell::new(0)),
            releases: Rc::new(Cell::new(0)),
        }
    }

    /// Outcomes for the next reads, `false` meaning a failed grab
    pub fn with_script(mut self, outcomes: &[bool]) -> Self {
        self.script = outcomes.iter().copied().collect();
        self
    }

    pub fn failing() -> Self {
        Self::new().with_script(&[false; 64])
    }
}

impl CaptureSource for FakeCapture {
    fn read(&mut self) -> Result<RgbImage> {
        self.reads.set(self.reads.get() + 1);
        if !self.open {
            return Err(anyhow!("fake camera released"));
        }
        match self.script.pop_front() {
            Some(false) => Err(anyhow!("fake camera has no frame")),
            _ => Ok(RgbImage::from_pixel(8, 6, Rgb([200, 40, 10]))),
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn release(&mut self) {
        if self.open {
            self.open = false;
            self.releases.set(self.releases.get() + 1);
        }
    }
}
