//! Impact marks left where shots landed
//!
//! A confirmed hit leaves a small visual mark: embedded in the world at the
//! impact point, or riding the struck enemy at a polar offset so the mark
//! follows the enemy's yaw. Marks are purely visual and time-bounded: they
//! live in a fixed-capacity ring where the oldest entry is overwritten, and
//! they are never removed by id.

use crate::foundation::math::{deg_to_rad, rad_to_deg, Vec3};
use crate::world::entities::Enemy;
use crate::world::ids::EntityId;

/// Default capacity of the world-level impact mark ring
pub const MAX_IMPACT_MARKS: usize = 50;

/// Position of a mark relative to the enemy it rides, expressed as angles
/// and distances so the mark swings with the enemy's yaw
#[derive(Debug, Clone, Copy)]
pub struct PolarOffset {
    /// Horizontal bearing from the enemy center, in degrees, measured
    /// relative to the enemy's yaw at impact time
    pub h_angle_deg: f32,
    /// Vertical bearing from the enemy center, in degrees
    pub v_angle_deg: f32,
    /// Horizontal distance from the enemy center
    pub h_distance: f32,
    /// Vertical-plane distance from the enemy center
    pub v_distance: f32,
}

impl PolarOffset {
    /// Capture the offset of an impact point relative to the struck enemy
    pub fn from_impact(enemy: &Enemy, impact_point: Vec3) -> Self {
        let d = enemy.body.position - impact_point;
        Self {
            h_angle_deg: rad_to_deg(d.z.atan2(d.x)) + enemy.yaw_deg + 180.0,
            v_angle_deg: rad_to_deg(d.y.atan2(d.x)),
            h_distance: (d.x * d.x + d.z * d.z).sqrt(),
            v_distance: (d.x * d.x + d.y * d.y).sqrt(),
        }
    }

    /// Resolve the world position of the mark for the enemy's current yaw
    pub fn world_position(&self, enemy: &Enemy) -> Vec3 {
        let h = enemy.yaw_deg + 180.0;
        let pos = enemy.body.position;
        Vec3::new(
            pos.x - deg_to_rad(h - self.h_angle_deg).cos() * self.h_distance,
            pos.y - deg_to_rad(self.v_angle_deg).sin() * self.v_distance,
            pos.z + deg_to_rad(h - self.h_angle_deg).sin() * self.h_distance,
        )
    }
}

/// One impact mark: either fixed in the world or attached to an enemy.
///
/// The two placements are explicit variants; a mark attached to an enemy
/// that has since been removed simply resolves to no position.
#[derive(Debug, Clone, Copy)]
pub enum ImpactMark {
    /// Mark embedded in world geometry at a fixed point
    Embedded {
        /// World-space impact point
        point: Vec3,
    },
    /// Mark riding a surviving enemy at a polar offset
    AttachedToEnemy {
        /// Id of the enemy the mark rides
        enemy: EntityId,
        /// Offset from the enemy center, captured at impact time
        offset: PolarOffset,
    },
}

/// Fixed-capacity ring of impact marks; the oldest mark is overwritten once
/// the capacity is reached
#[derive(Debug)]
pub struct MarkBuffer {
    marks: Vec<ImpactMark>,
    capacity: usize,
    total: usize,
}

impl MarkBuffer {
    /// Ring with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            marks: Vec::with_capacity(capacity),
            capacity,
            total: 0,
        }
    }

    /// Record a mark, overwriting the oldest once the ring is full
    pub fn push(&mut self, mark: ImpactMark) {
        if self.marks.len() < self.capacity {
            self.marks.push(mark);
        } else {
            self.marks[self.total % self.capacity] = mark;
        }
        self.total += 1;
    }

    /// Number of marks currently held
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether the ring holds no marks
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Total marks ever recorded, including overwritten ones
    pub fn total_recorded(&self) -> usize {
        self.total
    }

    /// Marks currently held, in slot order
    pub fn marks(&self) -> &[ImpactMark] {
        &self.marks
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.marks.clear();
        self.total = 0;
    }

    /// Resolve the current world position of every mark.
    ///
    /// Marks attached to an enemy id that no longer resolves are skipped:
    /// a stale id is tolerated, never an error.
    pub fn positions(&self, enemies: &[Enemy]) -> Vec<Vec3> {
        self.marks
            .iter()
            .filter_map(|mark| match mark {
                ImpactMark::Embedded { point } => Some(*point),
                ImpactMark::AttachedToEnemy { enemy, offset } => enemies
                    .iter()
                    .find(|e| e.id == *enemy)
                    .map(|e| offset.world_position(e)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::ids::IdAllocator;
    use approx::assert_relative_eq;

    #[test]
    fn ring_overwrites_the_oldest_mark() {
        let mut ring = MarkBuffer::new(3);
        for i in 0..5 {
            ring.push(ImpactMark::Embedded {
                point: Vec3::new(i as f32, 0.0, 0.0),
            });
        }

        assert_eq!(ring.len(), 3);
        assert_eq!(ring.total_recorded(), 5);

        // Slots 0 and 1 were overwritten by marks 3 and 4.
        let xs: Vec<f32> = ring
            .positions(&[])
            .iter()
            .map(|p| p.x)
            .collect();
        assert_eq!(xs, vec![3.0, 4.0, 2.0]);
    }

    #[test]
    fn attached_mark_follows_the_enemy_yaw() {
        let mut ids = IdAllocator::new();
        let mut enemy = Enemy::new(ids.allocate(), Vec3::new(5.0, 1.0, 0.0));
        enemy.yaw_deg = 0.0;

        // Impact on the enemy's -x face.
        let impact = Vec3::new(4.0, 1.0, 0.0);
        let offset = PolarOffset::from_impact(&enemy, impact);

        let resolved = offset.world_position(&enemy);
        assert_relative_eq!(resolved.x, impact.x, epsilon = 1e-4);
        assert_relative_eq!(resolved.y, impact.y, epsilon = 1e-4);
        assert_relative_eq!(resolved.z, impact.z, epsilon = 1e-4);

        // After a half turn the mark swings to the opposite face.
        enemy.yaw_deg = 180.0;
        let swung = offset.world_position(&enemy);
        assert_relative_eq!(swung.x, 6.0, epsilon = 1e-4);
        assert_relative_eq!(swung.z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn stale_enemy_ids_resolve_to_nothing() {
        let mut ids = IdAllocator::new();
        let enemy = Enemy::new(ids.allocate(), Vec3::new(5.0, 1.0, 0.0));

        let mut ring = MarkBuffer::new(4);
        ring.push(ImpactMark::AttachedToEnemy {
            enemy: enemy.id,
            offset: PolarOffset::from_impact(&enemy, Vec3::new(4.0, 1.0, 0.0)),
        });
        ring.push(ImpactMark::Embedded {
            point: Vec3::new(1.0, 2.0, 3.0),
        });

        // The enemy array no longer contains the struck enemy.
        let positions = ring.positions(&[]);
        assert_eq!(positions.len(), 1);
        assert_relative_eq!(positions[0].x, 1.0);
    }
}
