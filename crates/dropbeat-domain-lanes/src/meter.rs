use dropbeat_ports::types::FILL_MAX;

/// Bucket fill in [0, 100]. `add` is the only mutation besides `reset`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Meter {
    value: f32,
}

impl Meter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the result is saturated at 100.
    pub fn add(&mut self, delta: f32) -> bool {
        if delta.is_finite() {
            self.value = (self.value + delta).clamp(0.0, FILL_MAX);
        }
        self.is_full()
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn is_full(&self) -> bool {
        self.value >= FILL_MAX
    }
}
