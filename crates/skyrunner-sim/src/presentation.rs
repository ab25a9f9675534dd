//! Presentation layer contract.
//!
//! The simulation never touches a scene graph directly. It spawns, moves and
//! removes renderables through [`Presentation`] and asks it for bounding
//! volumes, since box dimensions depend on the meshes the renderer built.

use std::collections::BTreeMap;

use glam::DVec3;

use skyrunner_core::enums::RenderKind;
use skyrunner_core::types::{Aabb, Position, RenderHandle};

/// Operations the simulation needs from whatever draws the scene.
pub trait Presentation {
    fn spawn_renderable(&mut self, kind: RenderKind, position: Position) -> RenderHandle;

    fn remove_renderable(&mut self, handle: RenderHandle);

    /// World-space box around the renderable at its current position and
    /// heading, `None` for unknown handles.
    fn bounding_volume(&self, handle: RenderHandle) -> Option<Aabb>;

    fn set_position(&mut self, handle: RenderHandle, position: Position);

    fn position(&self, handle: RenderHandle) -> Option<Position>;

    /// Yaw about the y axis. Turns the bounding volume with the model.
    fn set_heading(&mut self, _handle: RenderHandle, _yaw: f64) {}
}

/// Model-space bounds of each renderable kind, before any yaw.
///
/// Vehicle: body, roof, windshield, wheels and headlights, nose on +x so the
/// spawn yaw of pi points it down -x.
/// Enemy: body, roof and wheels. Projectiles: 0.5-radius spheres.
pub fn local_bounds(kind: RenderKind) -> Aabb {
    match kind {
        RenderKind::Vehicle => Aabb::new(DVec3::new(-10.0, -8.0, -11.0), DVec3::new(11.5, 13.0, 11.0)),
        RenderKind::Enemy => Aabb::new(DVec3::new(-9.0, -6.5, -8.5), DVec3::new(9.0, 10.0, 8.5)),
        RenderKind::PlayerProjectile | RenderKind::EnemyProjectile => {
            Aabb::new(DVec3::splat(-0.5), DVec3::splat(0.5))
        }
    }
}

/// A renderable tracked by [`HeadlessPresentation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub kind: RenderKind,
    pub position: Position,
    pub heading: f64,
}

/// In-memory presentation layer for tests and the headless runner.
#[derive(Debug, Default)]
pub struct HeadlessPresentation {
    objects: BTreeMap<RenderHandle, SceneObject>,
    next_handle: u64,
}

impl HeadlessPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn object(&self, handle: RenderHandle) -> Option<&SceneObject> {
        self.objects.get(&handle)
    }

    /// Number of live renderables.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of live renderables of one kind.
    pub fn count(&self, kind: RenderKind) -> usize {
        self.objects.values().filter(|o| o.kind == kind).count()
    }
}

impl Presentation for HeadlessPresentation {
    fn spawn_renderable(&mut self, kind: RenderKind, position: Position) -> RenderHandle {
        let handle = RenderHandle(self.next_handle);
        self.next_handle += 1;
        self.objects.insert(
            handle,
            SceneObject {
                kind,
                position,
                heading: 0.0,
            },
        );
        handle
    }

    fn remove_renderable(&mut self, handle: RenderHandle) {
        self.objects.remove(&handle);
    }

    fn bounding_volume(&self, handle: RenderHandle) -> Option<Aabb> {
        self.objects
            .get(&handle)
            .map(|o| local_bounds(o.kind).rotated_y(o.heading).translated(o.position))
    }

    fn set_position(&mut self, handle: RenderHandle, position: Position) {
        if let Some(o) = self.objects.get_mut(&handle) {
            o.position = position;
        }
    }

    fn position(&self, handle: RenderHandle) -> Option<Position> {
        self.objects.get(&handle).map(|o| o.position)
    }

    fn set_heading(&mut self, handle: RenderHandle, yaw: f64) {
        if let Some(o) = self.objects.get_mut(&handle) {
            o.heading = yaw;
        }
    }
}
