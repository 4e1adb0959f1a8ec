//! Logging setup and the frame loop.

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::app::FrameSink;
use crate::clock::FrameClock;
use crate::session::{FrameEvents, Sculptor};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the default `info` filter. Calling this twice is
/// harmless; the second call is ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

/// Drives a [`Sculptor`] and feeds its frames to a [`FrameSink`].
pub struct Runner<S: FrameSink> {
    sculptor: Sculptor,
    sink: S,
    clock: FrameClock,
    started: bool,
}

impl<S: FrameSink> Runner<S> {
    pub fn new(sculptor: Sculptor, sink: S) -> Self {
        let clock = FrameClock::new(sculptor.config().max_frame_dt);
        Self {
            sculptor,
            sink,
            clock,
            started: false,
        }
    }

    pub const fn sculptor(&self) -> &Sculptor {
        &self.sculptor
    }

    pub fn sculptor_mut(&mut self) -> &mut Sculptor {
        &mut self.sculptor
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Run one frame of `raw_dt` seconds (clamped to the configured maximum).
    pub fn step(&mut self, raw_dt: f32) -> anyhow::Result<FrameEvents> {
        let dt = self.clock.advance(raw_dt);
        self.run_frame(dt)
    }

    /// Run one frame timed with the wall clock.
    pub fn step_realtime(&mut self) -> anyhow::Result<FrameEvents> {
        let dt = self.clock.tick();
        self.run_frame(dt)
    }

    fn run_frame(&mut self, dt: f32) -> anyhow::Result<FrameEvents> {
        if !self.started {
            let [width, height] = self.sculptor.config().viewport;
            self.sink.init(width, height)?;
            self.started = true;
            info!(width, height, "runner started");
        }

        let events = self.sculptor.update(dt);
        let frame = self.sculptor.render_frame();
        if let Err(e) = self.sink.present(&frame, &events) {
            error!("Present error: {e}");
            return Err(e);
        }
        Ok(events)
    }

    /// Stop the runner and hand back its parts.
    pub fn finish(mut self) -> (Sculptor, S) {
        self.sink.finish();
        self.clock.report();
        (self.sculptor, self.sink)
    }
}
