use crate::config::{TOP_N_DEFAULT, TOP_N_MAX, TOP_N_MIN};

/// Bounded row count picked by the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopNSlider {
    value: usize,
    min: usize,
    max: usize,
}

impl TopNSlider {
    pub fn new(value: usize, min: usize, max: usize) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn increase(&mut self) -> bool {
        self.set(self.value + 1)
    }

    pub fn decrease(&mut self) -> bool {
        self.set(self.value.saturating_sub(1))
    }

    /// Returns whether the value changed.
    pub fn set(&mut self, value: usize) -> bool {
        let value = value.clamp(self.min, self.max);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Position of the knob in `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        if self.max == self.min {
            return 1.0;
        }
        (self.value - self.min) as f64 / (self.max - self.min) as f64
    }
}

impl Default for TopNSlider {
    fn default() -> Self {
        Self::new(TOP_N_DEFAULT, TOP_N_MIN, TOP_N_MAX)
    }
}
