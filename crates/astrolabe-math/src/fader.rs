//! Linear fade-in / fade-out values driven by a boolean target.

/// A value in `[0, 1]` that moves toward its boolean target at a constant
/// speed of `1 / duration` per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fader {
    /// Whether the fader is heading toward 1.
    pub target: bool,
    /// Current value in `[0, 1]`.
    pub value: f64,
    /// Time in seconds for a full transition.
    pub duration: f64,
}

impl Default for Fader {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Fader {
    /// Transition time used by [`Fader::new`].
    pub const DEFAULT_DURATION: f64 = 0.2;

    /// Create a fader already settled at `visible`.
    pub fn new(visible: bool) -> Self {
        Self::with_duration(visible, Self::DEFAULT_DURATION)
    }

    /// Create a fader settled at `visible` with a custom transition time.
    pub fn with_duration(visible: bool, duration: f64) -> Self {
        Self {
            target: visible,
            value: if visible { 1.0 } else { 0.0 },
            duration,
        }
    }

    /// Advance toward the target. Returns `true` if the value changed.
    pub fn update(&mut self, dt: f64) -> bool {
        let old = self.value;
        let step = if self.duration > 0.0 {
            dt / self.duration
        } else {
            1.0
        };
        if self.target {
            self.value = (self.value + step).min(1.0);
        } else {
            self.value = (self.value - step).max(0.0);
        }
        self.value != old
    }

    /// Jump straight to the target value.
    pub fn settle(&mut self) {
        self.value = if self.target { 1.0 } else { 0.0 };
    }

    /// Fully faded out and not coming back.
    pub fn is_gone(&self) -> bool {
        !self.target && self.value == 0.0
    }
}
