//! Frame sink that logs instead of drawing.

use tracing::{debug, info, warn};

use sculptor_app::{FrameEvents, FrameSink, RenderFrame};

/// Counts what the session did and logs each edit.
#[derive(Debug, Default)]
pub struct LogSink {
    pub frames: u64,
    pub placed: u64,
    pub removed: u64,
    pub rejected: u64,
}

impl FrameSink for LogSink {
    fn init(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        info!(width, height, "headless sink ready");
        Ok(())
    }

    fn present(&mut self, frame: &RenderFrame, events: &FrameEvents) -> anyhow::Result<()> {
        self.frames += 1;

        for toggle in &events.toggles {
            info!(frame = self.frames, ?toggle, "toggle");
        }
        if let Some(id) = events.placed {
            self.placed += 1;
            info!(frame = self.frames, %id, voxels = frame.voxel_count(), "placed");
        }
        if let Some(record) = &events.removed {
            self.removed += 1;
            info!(frame = self.frames, center = ?record.center, "removed");
        }
        if let Some(err) = &events.rejected {
            self.rejected += 1;
            warn!(frame = self.frames, %err, "edit rejected");
        }
        if let Some(highlight) = &frame.highlight {
            debug!(
                frame = self.frames,
                point = ?highlight.point,
                on_voxel = highlight.on_voxel,
                "target"
            );
        }
        Ok(())
    }

    fn finish(&mut self) {
        info!(
            frames = self.frames,
            placed = self.placed,
            removed = self.removed,
            rejected = self.rejected,
            "session finished"
        );
    }
}
