/// Coarse state of the start-up animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum AnimationPhase {
    /// Warm-up window: static only, progress pinned at 0.
    Initializing,
    /// Cross-fading from static to the word display.
    Transitioning,
    /// Progress reached 1; static has faded out.
    Steady,
}

/// Monotonic cross-fade from the warm-up static to the word display.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transition {
    warmed_up: bool,
    progress: f64,
}

impl Transition {
    pub fn end_warm_up(&mut self) {
        self.warmed_up = true;
    }

    pub fn is_warmed_up(&self) -> bool {
        self.warmed_up
    }

    /// Advance by one rendered frame and return the new progress.
    pub fn advance(&mut self, step: f64) -> f64 {
        self.progress = if self.warmed_up {
            (self.progress + step).min(1.0)
        } else {
            0.0
        };
        self.progress
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn phase(&self) -> AnimationPhase {
        if !self.warmed_up {
            AnimationPhase::Initializing
        } else if self.progress >= 1.0 {
            AnimationPhase::Steady
        } else {
            AnimationPhase::Transitioning
        }
    }
}

/// Caps work to a target rate on top of a faster frame source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameThrottle {
    interval_ms: f64,
    last_ms: f64,
}

impl FrameThrottle {
    pub fn new(fps: u32) -> Self {
        Self {
            interval_ms: 1000.0 / f64::from(fps.max(1)),
            last_ms: 0.0,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// `true` when enough time has passed since the last rendered frame.
    /// The remainder past the interval is carried so the average rate holds.
    pub fn should_render(&mut self, now_ms: f64) -> bool {
        let elapsed = now_ms - self.last_ms;
        if elapsed < self.interval_ms {
            return false;
        }
        self.last_ms = now_ms - (elapsed % self.interval_ms);
        true
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/transition.rs"]
mod tests;
