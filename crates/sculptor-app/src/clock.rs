//! Frame timing.

use std::time::Instant;

use tracing::info;

/// Measures frame delta times and keeps FPS statistics.
///
/// Delta times are clamped to `[0, max_dt]`.
#[derive(Debug, Clone)]
pub struct FrameClock {
    max_dt: f32,
    last_tick: Option<Instant>,
    frame_count: u64,
    min_fps: f64,
    max_fps: f64,
    fps_sum: f64,
}

impl FrameClock {
    pub const fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            last_tick: None,
            frame_count: 0,
            min_fps: f64::MAX,
            max_fps: 0.0,
            fps_sum: 0.0,
        }
    }

    /// Delta time since the previous tick, measured with the wall clock.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Delta time since the previous tick, measured at `now`.
    ///
    /// The first tick returns zero.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let raw = self
            .last_tick
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f32());
        self.last_tick = Some(now);
        self.advance(raw)
    }

    /// Account for a frame of `raw` seconds and return the clamped delta.
    pub fn advance(&mut self, raw: f32) -> f32 {
        self.frame_count += 1;
        if raw > 0.0 {
            let fps = 1.0 / f64::from(raw);
            self.min_fps = self.min_fps.min(fps);
            self.max_fps = self.max_fps.max(fps);
            self.fps_sum += fps;
        }
        raw.clamp(0.0, self.max_dt)
    }

    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub const fn max_dt(&self) -> f32 {
        self.max_dt
    }

    /// Log min/max/average FPS.
    pub fn report(&self) {
        if self.frame_count > 0 && self.fps_sum > 0.0 {
            let avg_fps = self.fps_sum / self.frame_count as f64;
            info!("FPS Statistics:");
            info!("  Min: {:.1}", self.min_fps);
            info!("  Max: {:.1}", self.max_fps);
            info!("  Avg: {:.1}", avg_fps);
        }
        info!("  Total frames: {}", self.frame_count);
    }
}
