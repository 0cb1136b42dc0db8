//! Time management utilities

/// Scaled game clock driven by the host loop.
///
/// The host passes the raw frame delta to [`GameClock::advance`] and receives
/// the delta after time scaling. A time scale of `0.0` freezes gameplay
/// (pause) without stopping the host loop.
#[derive(Debug, Clone)]
pub struct GameClock {
    delta_time: f32,
    total_time: f64,
    time_scale: f32,
    frame_count: u64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// Create a new clock at time zero with a time scale of 1.0
    pub fn new() -> Self {
        Self {
            delta_time: 0.0,
            total_time: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }

    /// Advance the clock by one frame and return the scaled delta
    pub fn advance(&mut self, raw_delta: f32) -> f32 {
        let scaled = raw_delta.max(0.0) * self.time_scale;
        self.delta_time = scaled;
        self.total_time += f64::from(scaled);
        self.frame_count += 1;
        scaled
    }

    /// Set the time scale (negative values are treated as zero)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    /// Current time scale
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Whether gameplay time is frozen
    pub fn is_paused(&self) -> bool {
        self.time_scale == 0.0
    }

    /// Get the scaled time of the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total scaled time since the clock was created or reset
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Reset elapsed time and frame count, keeping the time scale
    pub fn reset(&mut self) {
        self.delta_time = 0.0;
        self.total_time = 0.0;
        self.frame_count = 0;
    }
}
