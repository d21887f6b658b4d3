//! Fixed-timestep frame loop.
//!
//! Animations advance in fixed steps fed by an accumulator while rendering
//! happens once per frame, whatever the frame time.

use tracing::warn;

/// Fixed update step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame time accepted before clamping.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator state of the loop.
#[derive(Debug, Default)]
pub struct FrameLoop {
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one frame of `frame_time` seconds.
    ///
    /// `update(state, FIXED_DT, sim_time)` runs zero or more times, then
    /// `render(state, alpha)` runs once with the interpolation alpha in
    /// `[0, 1)`.
    pub fn tick<S>(
        &mut self,
        frame_time: f64,
        state: &mut S,
        mut update: impl FnMut(&mut S, f64, f64),
        mut render: impl FnMut(&mut S, f64),
    ) {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        while self.accumulator >= FIXED_DT {
            update(state, FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render(state, self.alpha());
        self.frame_count += 1;
    }

    /// Fraction of a step left in the accumulator.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Simulated seconds elapsed.
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        updates: u32,
        renders: u32,
        alpha: f64,
    }

    fn tick(loop_: &mut FrameLoop, counter: &mut Counter, frame_time: f64) {
        loop_.tick(
            frame_time,
            counter,
            |c, _, _| c.updates += 1,
            |c, alpha| {
                c.renders += 1;
                c.alpha = alpha;
            },
        );
    }

    #[test]
    fn test_single_step() {
        let mut loop_ = FrameLoop::new();
        let mut c = Counter::default();
        tick(&mut loop_, &mut c, FIXED_DT);
        assert_eq!(c.updates, 1);
        assert_eq!(c.renders, 1);
        assert!(loop_.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_multiple_steps() {
        let mut loop_ = FrameLoop::new();
        let mut c = Counter::default();
        tick(&mut loop_, &mut c, 3.0 * FIXED_DT + 1e-9);
        assert_eq!(c.updates, 3);
        assert!((loop_.total_sim_time() - 3.0 * FIXED_DT).abs() < 1e-12);
    }

    #[test]
    fn test_partial_step_renders() {
        let mut loop_ = FrameLoop::new();
        let mut c = Counter::default();
        tick(&mut loop_, &mut c, 0.25 * FIXED_DT);
        assert_eq!(c.updates, 0);
        assert_eq!(c.renders, 1);
        assert!((c.alpha - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_max_frame_time_clamp() {
        let mut loop_ = FrameLoop::new();
        let mut c = Counter::default();
        tick(&mut loop_, &mut c, 1.0);
        let max_updates = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(c.updates > 0 && c.updates <= max_updates);
    }

    #[test]
    fn test_negative_frame_time_ignored() {
        let mut loop_ = FrameLoop::new();
        let mut c = Counter::default();
        tick(&mut loop_, &mut c, -1.0);
        assert_eq!(c.updates, 0);
        assert_eq!(loop_.alpha(), 0.0);
    }

    #[test]
    fn test_counts_and_sim_time() {
        let mut loop_ = FrameLoop::new();
        let mut c = Counter::default();
        for ft in [0.017, 0.015, 0.020, 0.016, 0.033, 0.008, 0.018] {
            tick(&mut loop_, &mut c, ft);
        }
        assert_eq!(loop_.frame_count(), 7);
        assert_eq!(loop_.update_count(), c.updates as u64);
        let expected = loop_.update_count() as f64 * FIXED_DT;
        assert!((loop_.total_sim_time() - expected).abs() < 1e-10);
    }
}
