//! Scripted input for headless sessions.

use std::fs;
use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use serde::Deserialize;

use sculptor_app::{FrameEvents, FrameSink, Runner};
use sculptor_input::InputBinding;

/// A sequence of input steps.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Script {
    pub steps: Vec<Step>,
}

/// Inputs applied for a run of frames.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Step {
    /// How many frames the step lasts
    pub frames: u32,
    /// Bindings held down for every frame of the step
    pub hold: Vec<InputBinding>,
    /// Bindings pressed on the first frame only
    pub tap: Vec<InputBinding>,
    /// Mouse motion added every frame, in pixels
    pub look: [f32; 2],
    /// Yaw and pitch (radians) to snap the camera to before the step
    pub aim: Option<[f32; 2]>,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            frames: 1,
            hold: Vec::new(),
            tap: Vec::new(),
            look: [0.0; 2],
            aim: None,
        }
    }
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }

    /// Total number of frames the script runs.
    pub fn frame_count(&self) -> u64 {
        self.steps.iter().map(|step| u64::from(step.frames)).sum()
    }

    /// Play every step through the runner, calling `on_frame` after each frame.
    pub fn play<S: FrameSink>(
        &self,
        runner: &mut Runner<S>,
        dt: f32,
        mut on_frame: impl FnMut(&FrameEvents),
    ) -> anyhow::Result<()> {
        for step in &self.steps {
            let sculptor = runner.sculptor_mut();
            if let Some([yaw, pitch]) = step.aim {
                sculptor.controller_mut().set_orientation(yaw, pitch);
            }
            let input = sculptor.input_mut();
            for &binding in step.hold.iter().chain(&step.tap) {
                input.set_binding(binding, true);
            }

            for frame in 0..step.frames {
                runner
                    .sculptor_mut()
                    .input_mut()
                    .add_look(Vec2::from(step.look));
                let events = runner.step(dt)?;
                on_frame(&events);

                if frame == 0 {
                    let input = runner.sculptor_mut().input_mut();
                    for &binding in &step.tap {
                        if !step.hold.contains(&binding) {
                            input.set_binding(binding, false);
                        }
                    }
                }
            }

            let input = runner.sculptor_mut().input_mut();
            for &binding in step.hold.iter().chain(&step.tap) {
                input.set_binding(binding, false);
            }
        }
        Ok(())
    }
}
