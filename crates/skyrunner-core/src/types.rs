//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position in scene units.
/// x = forward axis (the vehicle drives toward -x), y = up, z = lateral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D displacement per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking.
///
/// Stands in for the wall clock: every tick advances it by one frame,
/// whatever the game phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in milliseconds.
    pub elapsed_ms: f64,
}

/// Opaque handle to an object owned by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RenderHandle(pub u64);

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    /// Distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.to_dvec3().distance(other.to_dvec3())
    }

    /// This position shifted by a per-tick velocity.
    pub fn advanced_by(&self, velocity: &Velocity) -> Position {
        Position::new(
            self.x + velocity.x,
            self.y + velocity.y,
            self.z + velocity.z,
        )
    }

    /// Yaw (radians about +y) that turns an object's +z axis toward `target`.
    /// `None` when the horizontal offset is zero.
    pub fn yaw_to(&self, target: &Position) -> Option<f64> {
        let dx = target.x - self.x;
        let dz = target.z - self.z;
        if dx == 0.0 && dz == 0.0 {
            return None;
        }
        Some(dx.atan2(dz))
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Velocity of magnitude `speed` along `direction` (expected unit length).
    pub fn along(direction: DVec3, speed: f64) -> Self {
        (direction * speed).into()
    }
}

impl From<DVec3> for Velocity {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl SimTime {
    /// Advance by one frame of `frame_ms` milliseconds.
    pub fn advance(&mut self, frame_ms: f64) {
        self.tick += 1;
        // Derived from the tick count so rounding never accumulates.
        self.elapsed_ms = self.tick as f64 * frame_ms;
    }
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Box enclosing this one after a yaw of `yaw` radians about the local
    /// y axis. Positive yaw turns +z toward +x.
    pub fn rotated_y(&self, yaw: f64) -> Self {
        let (sin, cos) = yaw.sin_cos();
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for x in [self.min.x, self.max.x] {
            for z in [self.min.z, self.max.z] {
                let turned = DVec3::new(x * cos + z * sin, 0.0, -x * sin + z * cos);
                min = min.min(turned);
                max = max.max(turned);
            }
        }
        min.y = self.min.y;
        max.y = self.max.y;
        Self { min, max }
    }

    /// This box moved so its local origin sits at `position`.
    pub fn translated(&self, position: Position) -> Self {
        let offset = position.to_dvec3();
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Inclusive point containment.
    pub fn contains_point(&self, point: Position) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Inclusive overlap test; touching faces count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}
