use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CounterError {
    #[error("{0:?} is not a valid number for the counter")]
    NotANumber(String),

    #[error("counter value must be greater than or equal to 1, got {0}")]
    BelowOne(i64),

    #[error("counter value {0} is too large")]
    TooLarge(i64),

    #[error("there is no camera in slot {0}")]
    UnknownCamera(usize),
}

/// Per-camera image counter, always >= 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCounter {
    value: u32,
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self { value: 1 }
    }
}

impl FrameCounter {
    pub fn value(self) -> u32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 1;
    }

    pub fn increment(&mut self) {
        self.value = self.value.saturating_add(1);
    }

    /// Parse operator input and replace the value. On error the value is
    /// left as it was.
    pub fn set_manually(&mut self, input: &str) -> Result<u32, CounterError> {
        let parsed: i64 = input
            .trim()
            .parse()
            .map_err(|_| CounterError::NotANumber(input.to_string()))?;

        if parsed < 1 {
            return Err(CounterError::BelowOne(parsed));
        }
        self.value = u32::try_from(parsed).map_err(|_| CounterError::TooLarge(parsed))?;
        Ok(self.value)
    }
}
