//! A running sculpting session.

use tracing::{debug, info};

use sculptor_core::{GridSize, Result, VoxelKind};
use sculptor_input::{Action, CursorMode, InputManager};
use sculptor_physics::{
    FirstPersonController, HitTarget, MotionMode, MoveIntent, RaycastHit,
};
use sculptor_render::{Camera, Highlight, LightingRig, RenderFrame};
use sculptor_world::{SculptError, Sculpture, SculptureSnapshot, VoxelId, VoxelRecord};

use crate::config::SculptorConfig;
use crate::tools::{ToolAction, ToolSettings};

/// A setting the user flipped this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Toggle {
    Cursor(CursorMode),
    Mode(MotionMode),
    Tool(ToolAction),
    Kind(VoxelKind),
    Grid(GridSize),
}

/// What happened during one [`Sculptor::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameEvents {
    pub toggles: Vec<Toggle>,
    pub placed: Option<VoxelId>,
    pub removed: Option<VoxelRecord>,
    pub rejected: Option<SculptError>,
}

impl FrameEvents {
    /// Whether the frame changed anything besides camera motion.
    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
            && self.placed.is_none()
            && self.removed.is_none()
            && self.rejected.is_none()
    }
}

/// Input, camera, tools, and sculpture wired together.
pub struct Sculptor {
    config: SculptorConfig,
    input: InputManager,
    controller: FirstPersonController,
    sculpture: Sculpture,
    tools: ToolSettings,
    camera: Camera,
    lighting: LightingRig,
    target: Option<RaycastHit<VoxelId>>,
    frame_count: u64,
}

impl Sculptor {
    /// Start a session with an empty room.
    pub fn new(config: SculptorConfig) -> Result<Self> {
        config.validate()?;

        let controller = FirstPersonController::new(config.controller);
        let mut camera = Camera::from_yaw_pitch(
            controller.position(),
            controller.yaw(),
            controller.pitch(),
            1.0,
        );
        camera.set_viewport(config.viewport[0], config.viewport[1]);

        info!(
            half_extent = config.room.half_extent,
            height = config.room.height,
            mode = ?controller.mode(),
            "sculptor session started"
        );

        let mut sculptor = Self {
            input: InputManager::new(),
            controller,
            sculpture: Sculpture::new(config.room, config.sculpture),
            tools: config.tools,
            camera,
            lighting: LightingRig::default(),
            target: None,
            frame_count: 0,
            config,
        };
        sculptor.refresh_target();
        Ok(sculptor)
    }

    pub const fn config(&self) -> &SculptorConfig {
        &self.config
    }

    pub const fn input(&self) -> &InputManager {
        &self.input
    }

    /// Input state, for feeding window events or scripted presses.
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    pub const fn controller(&self) -> &FirstPersonController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FirstPersonController {
        &mut self.controller
    }

    pub const fn sculpture(&self) -> &Sculpture {
        &self.sculpture
    }

    pub fn sculpture_mut(&mut self) -> &mut Sculpture {
        &mut self.sculpture
    }

    pub const fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolSettings {
        &mut self.tools
    }

    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn lighting_mut(&mut self) -> &mut LightingRig {
        &mut self.lighting
    }

    /// What the center ray pointed at after the last update.
    pub const fn target(&self) -> Option<&RaycastHit<VoxelId>> {
        self.target.as_ref()
    }

    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Track a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        debug!(width, height, "viewport resized");
    }

    /// Advance the session by `dt` seconds.
    ///
    /// Order: refresh actions, apply toggles, mouse look, move the camera,
    /// update falling voxels, pick, edit, end the input frame.
    pub fn update(&mut self, dt: f32) -> FrameEvents {
        let dt = dt.clamp(0.0, self.config.max_frame_dt);
        let mut events = FrameEvents::default();

        self.input.update();
        self.apply_toggles(&mut events);

        if self.input.cursor_mode() == CursorMode::Locked {
            self.controller.look(self.input.look_delta());
        }
        let intent = self.move_intent();
        self.controller
            .step(intent, dt, self.config.gravity, &self.config.room);

        self.sculpture.update(dt, self.config.gravity);

        self.refresh_target();
        self.apply_edit(&mut events);

        self.input.end_frame();
        self.frame_count += 1;
        events
    }

    fn apply_toggles(&mut self, events: &mut FrameEvents) {
        if self.input.is_action_just_pressed(Action::ToggleCursor) {
            let mode = self.input.cursor_mode().toggled();
            self.input.set_cursor_mode(mode);
            events.toggles.push(Toggle::Cursor(mode));
        }
        if self.input.is_action_just_pressed(Action::ToggleMode) {
            self.controller.toggle_mode();
            events.toggles.push(Toggle::Mode(self.controller.mode()));
        }
        if self.input.is_action_just_pressed(Action::ToggleTool) {
            self.tools.action = self.tools.action.toggled();
            events.toggles.push(Toggle::Tool(self.tools.action));
        }
        if self.input.is_action_just_pressed(Action::ToggleKind) {
            self.tools.kind = self.tools.kind.toggled();
            events.toggles.push(Toggle::Kind(self.tools.kind));
        }

        let scroll = self.input.scroll_delta().y;
        let grow = self.input.is_action_just_pressed(Action::GridGrow) || scroll > 0.0;
        let shrink = self.input.is_action_just_pressed(Action::GridShrink) || scroll < 0.0;
        if (grow && self.tools.grow_grid()) || (shrink && self.tools.shrink_grid()) {
            events.toggles.push(Toggle::Grid(self.tools.grid_size));
        }

        for toggle in &events.toggles {
            debug!(?toggle, "setting changed");
        }
    }

    fn move_intent(&self) -> MoveIntent {
        [
            (Action::MoveForward, MoveIntent::FORWARD),
            (Action::MoveBack, MoveIntent::BACK),
            (Action::MoveLeft, MoveIntent::LEFT),
            (Action::MoveRight, MoveIntent::RIGHT),
            (Action::Ascend, MoveIntent::UP),
            (Action::Descend, MoveIntent::DOWN),
            (Action::Sprint, MoveIntent::SPRINT),
        ]
        .into_iter()
        .filter(|(action, _)| self.input.is_action_pressed(*action))
        .fold(MoveIntent::empty(), |intent, (_, flag)| intent | flag)
    }

    fn refresh_target(&mut self) {
        self.camera.set_position(self.controller.position());
        self.camera.direction = self.controller.view_direction();
        self.target = self
            .sculpture
            .raycast(&self.camera.center_ray(), self.config.reach);
    }

    fn apply_edit(&mut self, events: &mut FrameEvents) {
        let Some(hit) = self.target else {
            return;
        };
        match self.tools.action {
            ToolAction::Add if self.input.is_action_just_pressed(Action::Place) => {
                match self
                    .sculpture
                    .place_at_hit(hit.point, hit.normal, &self.tools.brush())
                {
                    Ok(id) => events.placed = Some(id),
                    Err(err) => {
                        debug!(%err, "placement rejected");
                        events.rejected = Some(err);
                    }
                }
            }
            ToolAction::Remove if self.input.is_action_just_pressed(Action::Remove) => {
                if let HitTarget::Voxel(id) = hit.target {
                    match self.sculpture.remove(id) {
                        Ok(record) => events.removed = Some(record),
                        Err(err) => events.rejected = Some(err),
                    }
                }
            }
            _ => return,
        }
        if events.placed.is_some() || events.removed.is_some() {
            self.refresh_target();
        }
    }

    /// Build everything a renderer needs for the current state.
    pub fn render_frame(&self) -> RenderFrame {
        let highlight = self.target.map(|hit| {
            let preview = (self.tools.action == ToolAction::Add).then(|| {
                let size = self.tools.grid_size;
                (size.placement_cell(hit.point, hit.normal).center(size), size.get())
            });
            Highlight {
                point: hit.point,
                normal: hit.normal,
                preview,
                on_voxel: hit.voxel().is_some(),
            }
        });
        let voxels = self.sculpture.voxels();
        RenderFrame::build(
            &self.camera,
            &self.lighting,
            self.sculpture.room(),
            &voxels,
            highlight,
        )
    }

    /// Replace the sculpture with the contents of a snapshot.
    ///
    /// Returns how many voxels were restored.
    pub fn load_snapshot(&mut self, snapshot: &SculptureSnapshot) -> usize {
        self.sculpture.clear();
        let restored = self.sculpture.restore(snapshot);
        info!(
            restored,
            skipped = snapshot.voxels.len() - restored,
            "snapshot loaded"
        );
        self.refresh_target();
        restored
    }
}
