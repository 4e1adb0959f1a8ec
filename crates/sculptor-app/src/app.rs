//! `FrameSink` trait definition.

use sculptor_render::RenderFrame;

use crate::session::FrameEvents;

/// Consumer of finished frames.
///
/// Implement this trait to put a sculpting session on screen (or anywhere
/// else). The runner drives the session and hands every frame to the sink.
pub trait FrameSink {
    /// Called once before the first frame with the initial viewport size.
    ///
    /// Default implementation does nothing.
    #[allow(unused_variables)]
    fn init(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        Ok(())
    }

    /// Present a frame.
    ///
    /// `events` lists what the session did while producing it.
    fn present(&mut self, frame: &RenderFrame, events: &FrameEvents) -> anyhow::Result<()>;

    /// Called when the runner stops.
    ///
    /// Default implementation does nothing.
    fn finish(&mut self) {}
}

/// Sink that drops every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {
    fn present(&mut self, _frame: &RenderFrame, _events: &FrameEvents) -> anyhow::Result<()> {
        Ok(())
    }
}
