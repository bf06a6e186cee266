//! World-level hitscan queries
//!
//! One query tests a ray against the ground, the four boundary walls, every
//! obstacle, and every live enemy's silhouette mesh, then reports the
//! nearest identified hit. The queries never mutate entity health or the
//! entity arrays; the weapon logic in [`crate::world::step`] applies
//! effects from the returned ids.

use crate::foundation::math::{deg_to_rad, Vec3};
use crate::physics::raycast::{
    EntityCategory, HitBuffer, HitFilter, IdentifiedHit, Ray, RaySurfaceHit,
};
use crate::world::entities::{Block, EnemyState};
use crate::world::World;
use rand::Rng;

/// Maximum deflection radius of a spread pellet around the central aim point
pub const SPREAD_MAX_RADIUS: f32 = 1.5;

fn identified(surface: RaySurfaceHit, id: crate::world::EntityId, category: EntityCategory) -> IdentifiedHit {
    IdentifiedHit {
        entity_id: id,
        category,
        point: surface.point,
        distance: surface.distance,
        normal: surface.normal,
    }
}

impl World {
    /// Resolve the nearest thing a ray from `origin` toward `aim_point`
    /// strikes, or the no-hit sentinel.
    ///
    /// Repeated calls with unchanged inputs give identical results.
    pub fn resolve_nearest_hit(&self, origin: Vec3, aim_point: Vec3) -> IdentifiedHit {
        let mut buffer = HitBuffer::new();
        self.resolve_nearest_hit_with(origin, aim_point, HitFilter::all(), &mut buffer)
    }

    /// Nearest-hit query with an explicit category filter and a reusable
    /// scratch buffer. The buffer is cleared, filled, and sorted; callers
    /// may inspect it afterwards for the full ordered hit list.
    pub fn resolve_nearest_hit_with(
        &self,
        origin: Vec3,
        aim_point: Vec3,
        filter: HitFilter,
        buffer: &mut HitBuffer,
    ) -> IdentifiedHit {
        let ray = Ray::toward(origin, aim_point);
        buffer.clear();
        self.collect_hits(&ray, filter, buffer);
        buffer.sort_by_distance();
        buffer.nearest()
    }

    /// Resolve one pellet-spread volley: exactly `pellet_count` nearest-hit
    /// results in pellet order, each possibly the sentinel, never merged or
    /// deduplicated.
    ///
    /// Each pellet deflects the aim point by a pseudo-random radius and
    /// angle in the disc perpendicular to the firer's facing, so the spread
    /// cone follows the view direction rather than the world axes. The
    /// random source is the world-owned seeded generator: a fixed seed gives
    /// a reproducible volley.
    pub fn resolve_spread_hits(
        &mut self,
        origin: Vec3,
        aim_point: Vec3,
        pellet_count: usize,
    ) -> Vec<IdentifiedHit> {
        let yaw_deg = self.player.yaw_deg;
        let mut buffer = HitBuffer::new();
        let mut hits = Vec::with_capacity(pellet_count);

        for _ in 0..pellet_count {
            let radius = self.rng.gen_range(0.0..SPREAD_MAX_RADIUS);
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let deflected = deflect_aim(aim_point, yaw_deg, radius, angle);
            hits.push(self.resolve_nearest_hit_with(origin, deflected, HitFilter::all(), &mut buffer));
        }

        hits
    }

    /// Collect every hit along the ray into the buffer, insertion-ordered:
    /// ground and walls first, then obstacles, then enemies. The stable
    /// distance sort applied afterwards keeps that order for exact ties.
    fn collect_hits(&self, ray: &Ray, filter: HitFilter, buffer: &mut HitBuffer) {
        if filter.accepts(EntityCategory::StaticBlock) {
            self.collect_block(ray, &self.ground, EntityCategory::StaticBlock, buffer);
            for wall in self.walls() {
                self.collect_block(ray, wall, EntityCategory::StaticBlock, buffer);
            }
        }

        if filter.accepts(EntityCategory::Obstacle) {
            for obstacle in &self.obstacles {
                self.collect_block(ray, obstacle, EntityCategory::Obstacle, buffer);
            }
        }

        if filter.accepts(EntityCategory::Enemy) {
            for enemy in &self.enemies {
                if enemy.state != EnemyState::Alive {
                    continue;
                }
                if let Some(surface) = self.enemy_mesh.intersect_ray(ray, &enemy.world_transform())
                {
                    buffer.push(identified(surface, enemy.id, EntityCategory::Enemy));
                }
            }
        }
    }

    fn collect_block(
        &self,
        ray: &Ray,
        block: &Block,
        category: EntityCategory,
        buffer: &mut HitBuffer,
    ) {
        if let Some(surface) = ray.intersect_aabb(&block.aabb()) {
            buffer.push(identified(surface, block.id, category));
        }
    }
}

/// Deflect an aim point by `radius` at `angle` in the disc facing the firer.
///
/// The vertical component rides world up; the lateral component rides the
/// axis perpendicular to the firer's facing on the ground plane, which is
/// the second rotation that orients the cone along the view direction.
fn deflect_aim(aim_point: Vec3, yaw_deg: f32, radius: f32, angle: f32) -> Vec3 {
    let lateral = radius * angle.cos();
    let vertical = radius * angle.sin();
    let yaw = deg_to_rad(yaw_deg);
    let right = Vec3::new(yaw.sin(), 0.0, yaw.cos());
    aim_point + right * lateral + Vec3::new(0.0, vertical, 0.0)
}
