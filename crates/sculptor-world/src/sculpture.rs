//! The set of placed voxels.

use std::fmt;

use glam::Vec3;
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use sculptor_core::constants::OCCUPANCY_EPSILON;
use sculptor_core::math::{Aabb, Ray};
use sculptor_core::{Appearance, GridCell, GridSize, VoxelKind};
use sculptor_physics::{raycast, RaycastHit, Room, VerticalBody};

use crate::components::{Falling, Position, VoxelSize};
use crate::snapshot::{SculptureSnapshot, VoxelRecord};

/// How far below a falling voxel's bottom face a support top may sit and
/// still count as underneath it.
const SUPPORT_TOLERANCE: f32 = 1e-3;

/// Handle to a placed voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VoxelId(Entity);

impl fmt::Display for VoxelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "voxel#{}", self.0.id())
    }
}

/// Errors from editing a sculpture.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SculptError {
    #[error("cell centered at {center} is already occupied by {by}")]
    Occupied { center: Vec3, by: VoxelId },

    #[error("voxel centered at {center} would stick out of the room")]
    OutsideRoom { center: Vec3 },

    #[error("{0} does not exist")]
    UnknownVoxel(VoxelId),
}

/// What gets placed: taken from the tool settings at click time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub kind: VoxelKind,
    pub size: GridSize,
    pub appearance: Appearance,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            kind: VoxelKind::Static,
            size: GridSize::ONE,
            appearance: Appearance::default(),
        }
    }
}

/// Behavior switches for a sculpture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SculptureSettings {
    /// Falling voxels stop on top of other voxels, not only on the floor.
    pub land_on_voxels: bool,
}

impl Default for SculptureSettings {
    fn default() -> Self {
        Self {
            land_on_voxels: true,
        }
    }
}

/// Read-only view of one voxel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelView {
    pub id: VoxelId,
    pub center: Vec3,
    pub size: GridSize,
    pub kind: VoxelKind,
    pub appearance: Appearance,
}

impl VoxelView {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.center, self.size.get())
    }
}

/// All voxels in the room.
pub struct Sculpture {
    world: World,
    room: Room,
    settings: SculptureSettings,
    /// Bumped on every change so renderers know when to rebuild.
    revision: u64,
}

impl Sculpture {
    pub fn new(room: Room, settings: SculptureSettings) -> Self {
        Self {
            world: World::new(),
            room,
            settings,
            revision: 0,
        }
    }

    pub const fn room(&self) -> &Room {
        &self.room
    }

    pub const fn settings(&self) -> &SculptureSettings {
        &self.settings
    }

    /// Number of voxels.
    pub fn len(&self) -> usize {
        self.world.len() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.world.len() == 0
    }

    /// Counter that changes whenever the voxel set or a voxel position changes.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Place a voxel in the cell adjacent to a struck face.
    pub fn place_at_hit(
        &mut self,
        point: Vec3,
        normal: Vec3,
        brush: &Brush,
    ) -> Result<VoxelId, SculptError> {
        let cell = brush.size.placement_cell(point, normal);
        self.place_in_cell(cell, brush)
    }

    /// Place a voxel at the center of `cell` on the brush's grid.
    pub fn place_in_cell(&mut self, cell: GridCell, brush: &Brush) -> Result<VoxelId, SculptError> {
        let center = cell.center(brush.size);
        self.spawn_checked(center, brush, 0.0)
    }

    fn spawn_checked(
        &mut self,
        center: Vec3,
        brush: &Brush,
        vy: f32,
    ) -> Result<VoxelId, SculptError> {
        if !self
            .room
            .contains(&Aabb::from_center_size(center, brush.size.get()))
        {
            return Err(SculptError::OutsideRoom { center });
        }
        if let Some(by) = self.occupant(center, brush.size) {
            return Err(SculptError::Occupied { center, by });
        }

        let position = Position(center);
        let size = VoxelSize(brush.size);
        let entity = match brush.kind {
            VoxelKind::Static => self
                .world
                .spawn((position, size, brush.kind, brush.appearance)),
            VoxelKind::Gravity => self.world.spawn((
                position,
                size,
                brush.kind,
                brush.appearance,
                Falling { vy },
            )),
        };
        self.revision += 1;

        let id = VoxelId(entity);
        info!(%id, ?center, kind = ?brush.kind, size = brush.size.get(), "voxel placed");
        Ok(id)
    }

    /// First voxel whose center lies within `size · ε` of `center`.
    pub fn occupant(&self, center: Vec3, size: GridSize) -> Option<VoxelId> {
        let threshold = size.get() * OCCUPANCY_EPSILON;
        self.world
            .query::<&Position>()
            .iter()
            .find(|(_, position)| position.0.distance(center) < threshold)
            .map(|(entity, _)| VoxelId(entity))
    }

    /// Delete a voxel and return what it was.
    pub fn remove(&mut self, id: VoxelId) -> Result<VoxelRecord, SculptError> {
        let record = self.record(id).ok_or(SculptError::UnknownVoxel(id))?;
        self.world
            .despawn(id.0)
            .map_err(|_| SculptError::UnknownVoxel(id))?;
        self.revision += 1;
        info!(%id, center = ?record.center, "voxel removed");
        Ok(record)
    }

    /// Remove every voxel.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.world.clear();
            self.revision += 1;
        }
    }

    /// Look up a single voxel.
    pub fn voxel(&self, id: VoxelId) -> Option<VoxelView> {
        let mut query = self
            .world
            .query_one::<(&Position, &VoxelSize, &VoxelKind, &Appearance)>(id.0)
            .ok()?;
        query
            .get()
            .map(|(position, size, kind, appearance)| VoxelView {
                id,
                center: position.0,
                size: size.0,
                kind: *kind,
                appearance: *appearance,
            })
    }

    /// Every voxel, in no particular order.
    pub fn voxels(&self) -> Vec<VoxelView> {
        self.world
            .query::<(&Position, &VoxelSize, &VoxelKind, &Appearance)>()
            .iter()
            .map(|(entity, (position, size, kind, appearance))| VoxelView {
                id: VoxelId(entity),
                center: position.0,
                size: size.0,
                kind: *kind,
                appearance: *appearance,
            })
            .collect()
    }

    fn record(&self, id: VoxelId) -> Option<VoxelRecord> {
        let view = self.voxel(id)?;
        let vy = self
            .world
            .get::<&Falling>(id.0)
            .map_or(0.0, |falling| falling.vy);
        Some(VoxelRecord::from_view(&view, vy))
    }

    /// Pick the nearest voxel face or room surface along `ray`.
    pub fn raycast(&self, ray: &Ray, reach: f32) -> Option<RaycastHit<VoxelId>> {
        let mut query = self.world.query::<(&Position, &VoxelSize)>();
        let boxes = query.iter().map(|(entity, (position, size))| {
            (
                VoxelId(entity),
                Aabb::from_center_size(position.0, size.0.get()),
            )
        });
        raycast(ray, reach, &self.room, boxes)
    }

    /// Advance every gravity voxel by `dt`.
    ///
    /// Each falling voxel is clamped onto the floor (center at half its size)
    /// and, when enabled, onto the highest voxel top under its footprint.
    /// Supports are sampled once at the start of the step.
    pub fn update(&mut self, dt: f32, gravity: f32) {
        let supports: Vec<(Entity, Aabb)> = if self.settings.land_on_voxels {
            self.world
                .query::<(&Position, &VoxelSize)>()
                .iter()
                .map(|(entity, (position, size))| {
                    (entity, Aabb::from_center_size(position.0, size.0.get()))
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut moved = false;
        for (entity, (position, size, falling)) in self
            .world
            .query_mut::<(&mut Position, &VoxelSize, &mut Falling)>()
        {
            let half = size.0.half();
            let own = Aabb::from_center_size(position.0, size.0.get());
            let bottom = own.min.y;

            let floor = supports
                .iter()
                .filter(|(other, aabb)| {
                    *other != entity
                        && aabb.overlaps_footprint(&own)
                        && aabb.max.y <= bottom + SUPPORT_TOLERANCE
                })
                .map(|(_, aabb)| aabb.max.y + half)
                .fold(half, f32::max);

            let mut body = VerticalBody::new(position.0.y, falling.vy);
            let landed = body.integrate(dt, gravity, floor);
            if landed && falling.vy < 0.0 {
                debug!(id = %VoxelId(entity), y = body.y, "voxel landed");
            }
            if body.y != position.0.y {
                moved = true;
            }
            position.0.y = body.y;
            falling.vy = body.vy;
        }

        if moved {
            self.revision += 1;
        }
    }

    /// Copy every voxel out for saving.
    pub fn snapshot(&self) -> SculptureSnapshot {
        let voxels = self
            .world
            .query::<(&Position, &VoxelSize, &VoxelKind, &Appearance, Option<&Falling>)>()
            .iter()
            .map(|(entity, (position, size, kind, appearance, falling))| {
                let view = VoxelView {
                    id: VoxelId(entity),
                    center: position.0,
                    size: size.0,
                    kind: *kind,
                    appearance: *appearance,
                };
                VoxelRecord::from_view(&view, falling.map_or(0.0, |f| f.vy))
            })
            .collect();
        SculptureSnapshot::new(voxels)
    }

    /// Add the voxels from a snapshot to this sculpture.
    ///
    /// Records that fall outside this room or collide with an existing voxel
    /// are skipped. Returns how many were restored.
    pub fn restore(&mut self, snapshot: &SculptureSnapshot) -> usize {
        let mut restored = 0;
        for record in &snapshot.voxels {
            let brush = Brush {
                kind: record.kind,
                size: record.size,
                appearance: record.appearance,
            };
            match self.spawn_checked(record.center, &brush, record.vy) {
                Ok(_) => restored += 1,
                Err(err) => warn!(%err, "skipping voxel from snapshot"),
            }
        }
        restored
    }
}

impl Default for Sculpture {
    fn default() -> Self {
        Self::new(Room::default(), SculptureSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sculptor_core::constants::GRAVITY;
    use sculptor_core::grid::is_cell_center;
    use sculptor_physics::{HitTarget, RoomSurface};

    const DT: f32 = 1.0 / 60.0;

    fn gravity_brush() -> Brush {
        Brush {
            kind: VoxelKind::Gravity,
            ..Brush::default()
        }
    }

    fn settle(sculpture: &mut Sculpture, seconds: f32) {
        let steps = (seconds / DT) as usize;
        for _ in 0..steps {
            sculpture.update(DT, GRAVITY);
        }
    }

    #[test]
    fn place_on_floor_snaps_to_cell_center() {
        let mut sculpture = Sculpture::default();
        let id = sculpture
            .place_at_hit(Vec3::new(2.3, 0.0, -1.2), Vec3::Y, &Brush::default())
            .unwrap();
        let voxel = sculpture.voxel(id).unwrap();
        assert_eq!(voxel.center, Vec3::new(2.5, 0.5, -1.5));
        assert!(is_cell_center(voxel.center, voxel.size));
        assert_eq!(sculpture.len(), 1);
    }

    #[test]
    fn place_with_small_grid() {
        let mut sculpture = Sculpture::default();
        let brush = Brush {
            size: GridSize::new(0.25).unwrap(),
            ..Brush::default()
        };
        let id = sculpture
            .place_at_hit(Vec3::new(0.3, 0.0, 0.3), Vec3::Y, &brush)
            .unwrap();
        let voxel = sculpture.voxel(id).unwrap();
        assert_relative_eq!(voxel.center.x, 0.375);
        assert_relative_eq!(voxel.center.y, 0.125);
        assert!(is_cell_center(voxel.center, brush.size));
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let mut sculpture = Sculpture::default();
        let brush = Brush::default();
        let first = sculpture.place_in_cell(GridCell::new(0, 0, 0), &brush).unwrap();
        let err = sculpture
            .place_in_cell(GridCell::new(0, 0, 0), &brush)
            .unwrap_err();
        assert_eq!(
            err,
            SculptError::Occupied {
                center: Vec3::splat(0.5),
                by: first
            }
        );
        // Frame events carry rejections by value.
        assert_eq!(err.clone(), err);
        assert_eq!(sculpture.len(), 1);
    }

    #[test]
    fn neighbouring_cells_are_free() {
        let mut sculpture = Sculpture::default();
        let brush = Brush::default();
        sculpture.place_in_cell(GridCell::new(0, 0, 0), &brush).unwrap();
        sculpture.place_in_cell(GridCell::new(1, 0, 0), &brush).unwrap();
        sculpture.place_in_cell(GridCell::new(0, 1, 0), &brush).unwrap();
        assert_eq!(sculpture.len(), 3);
    }

    #[test]
    fn stacking_on_a_voxel_face() {
        let mut sculpture = Sculpture::default();
        let brush = Brush::default();
        let base = sculpture.place_in_cell(GridCell::new(0, 0, 0), &brush).unwrap();
        // Top face of the base cube.
        let top = sculpture
            .place_at_hit(Vec3::new(0.4, 1.0, 0.6), Vec3::Y, &brush)
            .unwrap();
        assert_ne!(base, top);
        assert_eq!(sculpture.voxel(top).unwrap().center, Vec3::new(0.5, 1.5, 0.5));
    }

    #[test]
    fn voxels_may_not_leave_the_room() {
        let mut sculpture = Sculpture::default();
        let err = sculpture
            .place_in_cell(GridCell::new(20, 0, 0), &Brush::default())
            .unwrap_err();
        assert!(matches!(err, SculptError::OutsideRoom { .. }));
        let err = sculpture
            .place_in_cell(GridCell::new(0, -1, 0), &Brush::default())
            .unwrap_err();
        assert!(matches!(err, SculptError::OutsideRoom { .. }));
    }

    #[test]
    fn remove_deletes_only_the_target() {
        let mut sculpture = Sculpture::default();
        let brush = Brush::default();
        let a = sculpture.place_in_cell(GridCell::new(0, 0, 0), &brush).unwrap();
        let b = sculpture.place_in_cell(GridCell::new(2, 0, 0), &brush).unwrap();
        let revision = sculpture.revision();

        let record = sculpture.remove(a).unwrap();
        assert_eq!(record.center, Vec3::splat(0.5));
        assert!(sculpture.voxel(a).is_none());
        assert!(sculpture.voxel(b).is_some());
        assert_eq!(sculpture.len(), 1);
        assert!(sculpture.revision() > revision);

        assert_eq!(sculpture.remove(a).unwrap_err(), SculptError::UnknownVoxel(a));
    }

    #[test]
    fn removed_cell_can_be_reused() {
        let mut sculpture = Sculpture::default();
        let brush = Brush::default();
        let a = sculpture.place_in_cell(GridCell::new(3, 0, 3), &brush).unwrap();
        sculpture.remove(a).unwrap();
        assert!(sculpture.place_in_cell(GridCell::new(3, 0, 3), &brush).is_ok());
    }

    #[test]
    fn gravity_voxel_falls_to_the_floor() {
        let mut sculpture = Sculpture::default();
        let id = sculpture
            .place_in_cell(GridCell::new(0, 5, 0), &gravity_brush())
            .unwrap();
        sculpture.update(DT, GRAVITY);
        let after_one = sculpture.voxel(id).unwrap().center.y;
        assert!(after_one < 5.5);

        settle(&mut sculpture, 3.0);
        assert_relative_eq!(sculpture.voxel(id).unwrap().center.y, 0.5);
        assert_relative_eq!(sculpture.snapshot().voxels[0].vy, 0.0);
    }

    #[test]
    fn static_voxels_do_not_fall() {
        let mut sculpture = Sculpture::default();
        let id = sculpture
            .place_in_cell(GridCell::new(0, 5, 0), &Brush::default())
            .unwrap();
        let revision = sculpture.revision();
        settle(&mut sculpture, 1.0);
        assert_relative_eq!(sculpture.voxel(id).unwrap().center.y, 5.5);
        assert_eq!(sculpture.revision(), revision);
    }

    #[test]
    fn gravity_voxel_lands_on_a_static_one() {
        let mut sculpture = Sculpture::default();
        sculpture
            .place_in_cell(GridCell::new(0, 0, 0), &Brush::default())
            .unwrap();
        let falling = sculpture
            .place_in_cell(GridCell::new(0, 6, 0), &gravity_brush())
            .unwrap();
        settle(&mut sculpture, 3.0);
        assert_relative_eq!(sculpture.voxel(falling).unwrap().center.y, 1.5);
    }

    #[test]
    fn gravity_voxel_ignores_voxels_when_landing_disabled() {
        let mut sculpture = Sculpture::new(
            Room::default(),
            SculptureSettings {
                land_on_voxels: false,
            },
        );
        sculpture
            .place_in_cell(GridCell::new(0, 0, 0), &Brush::default())
            .unwrap();
        let falling = sculpture
            .place_in_cell(GridCell::new(0, 6, 0), &gravity_brush())
            .unwrap();
        settle(&mut sculpture, 3.0);
        assert_relative_eq!(sculpture.voxel(falling).unwrap().center.y, 0.5);
    }

    #[test]
    fn removing_a_support_lets_the_voxel_fall_again() {
        let mut sculpture = Sculpture::default();
        let support = sculpture
            .place_in_cell(GridCell::new(0, 0, 0), &Brush::default())
            .unwrap();
        let resting = sculpture
            .place_in_cell(GridCell::new(0, 1, 0), &gravity_brush())
            .unwrap();
        settle(&mut sculpture, 0.5);
        assert_relative_eq!(sculpture.voxel(resting).unwrap().center.y, 1.5);

        sculpture.remove(support).unwrap();
        settle(&mut sculpture, 1.0);
        assert_relative_eq!(sculpture.voxel(resting).unwrap().center.y, 0.5);
    }

    #[test]
    fn raycast_reports_voxel_ids() {
        let mut sculpture = Sculpture::default();
        let id = sculpture
            .place_in_cell(GridCell::new(0, 0, -3), &Brush::default())
            .unwrap();
        let ray = Ray::new(Vec3::new(0.5, 0.5, 6.0), Vec3::NEG_Z);
        let hit = sculpture.raycast(&ray, 100.0).unwrap();
        assert_eq!(hit.target, HitTarget::Voxel(id));
        assert_eq!(hit.normal, Vec3::Z);

        sculpture.remove(id).unwrap();
        let hit = sculpture.raycast(&ray, 100.0).unwrap();
        assert_eq!(hit.target, HitTarget::Room(RoomSurface::Wall));
    }

    #[test]
    fn snapshot_restore_keeps_voxels() {
        let mut sculpture = Sculpture::default();
        let brush = Brush::default();
        sculpture.place_in_cell(GridCell::new(0, 0, 0), &brush).unwrap();
        sculpture
            .place_in_cell(GridCell::new(1, 3, 0), &gravity_brush())
            .unwrap();

        let snapshot = sculpture.snapshot();
        let mut copy = Sculpture::default();
        assert_eq!(copy.restore(&snapshot), 2);
        assert_eq!(copy.len(), 2);

        // Restoring twice collides with itself.
        assert_eq!(copy.restore(&snapshot), 0);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn clear_empties_the_sculpture() {
        let mut sculpture = Sculpture::default();
        sculpture
            .place_in_cell(GridCell::new(0, 0, 0), &Brush::default())
            .unwrap();
        sculpture.clear();
        assert!(sculpture.is_empty());
        assert!(sculpture.voxels().is_empty());
    }
}
