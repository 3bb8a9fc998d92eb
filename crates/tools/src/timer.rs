use std::time::{Duration, Instant};

/// Longest frame delta handed to camera movement, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Weight of the newest sample in the FPS average.
const FPS_SMOOTHING: f32 = 0.1;

/// Per-frame delta time and a smoothed frame rate.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last: Option<Instant>,
    delta: f32,
    fps: f32,
    frames: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: None,
            delta: 0.0,
            fps: 0.0,
            frames: 0,
        }
    }

    /// Mark the start of a frame and return its delta in seconds.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// [`FrameTimer::tick`] with an explicit clock reading.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let elapsed = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        self.record(elapsed.as_secs_f32())
    }

    fn record(&mut self, raw: f32) -> f32 {
        self.frames += 1;
        if raw > 0.0 {
            let instant_fps = 1.0 / raw;
            self.fps = if self.fps == 0.0 {
                instant_fps
            } else {
                self.fps + (instant_fps - self.fps) * FPS_SMOOTHING
            };
        }
        self.delta = raw.min(MAX_FRAME_DELTA);
        self.delta
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
