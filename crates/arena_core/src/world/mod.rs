//! The arena world: entities, identity, hit queries, and the frame step
//!
//! The world owns every entity array and is the only thing that mutates
//! them, inside the synchronous per-frame update. Hit queries are read-only
//! over the geometry; removal goes through id-keyed compaction so raycast
//! results stay valid across a frame.

pub mod effects;
pub mod entities;
pub mod hits;
pub mod ids;
pub mod lifecycle;
pub mod step;

pub use effects::{ImpactMark, MarkBuffer, PolarOffset, MAX_IMPACT_MARKS};
pub use entities::{
    Block, Body, Enemy, EnemyState, MotionState, Player, PlayerState, PowerUp, PowerUpKind,
    PowerUpState,
};
pub use ids::{EntityId, IdAllocator};

use crate::config::WorldConfig;
use crate::foundation::math::Vec3;
use crate::physics::raycast::MeshTemplate;
use crate::world::entities::ACTOR_HALF_EXTENTS;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// The full arena state
///
/// Static geometry (ground, walls, obstacles) is created once at
/// configuration and only replaced by a bulk [`World::reset`]. Enemies and
/// power-ups are removed individually through compaction when killed or
/// consumed.
pub struct World {
    /// The player actor
    pub player: Player,
    /// Live enemies; dense, contiguous, compacted on death
    pub enemies: Vec<Enemy>,
    /// Obstacle blocks
    pub obstacles: Vec<Block>,
    /// Live power-ups; dense, contiguous, compacted on consumption
    pub power_ups: Vec<PowerUp>,
    /// The ground slab
    pub ground: Block,
    /// Boundary wall on the negative X side
    pub left_wall: Block,
    /// Boundary wall on the positive X side
    pub right_wall: Block,
    /// Boundary wall on the negative Z side
    pub far_wall: Block,
    /// Boundary wall on the positive Z side
    pub near_wall: Block,
    /// Impact marks left by resolved shots
    pub marks: MarkBuffer,
    /// Downward acceleration applied to every movable entity
    pub gravity: f32,

    pub(crate) enemy_mesh: MeshTemplate,
    pub(crate) ids: IdAllocator,
    pub(crate) power_up_ids: IdAllocator,
    pub(crate) rng: SmallRng,
    config: WorldConfig,
}

impl World {
    /// Build a world from configuration
    pub fn from_config(config: WorldConfig) -> Self {
        let mut ids = IdAllocator::new();
        let mut power_up_ids = IdAllocator::new();

        let arena = &config.arena;
        let g_pos = arena.ground_position;
        let g_half = arena.ground_half_extents;
        let ground = Block::new(ids.allocate(), g_pos, g_half);

        let hh = arena.wall_half_height;
        let ht = arena.wall_half_thickness;
        let wall_y = g_pos.y + g_half.y + hh;

        // Each wall sits flush against one edge of the ground slab.
        let left_wall = Block::new(
            ids.allocate(),
            Vec3::new(g_pos.x - g_half.x - ht, wall_y, g_pos.z),
            Vec3::new(ht, hh, g_half.z),
        );
        let right_wall = Block::new(
            ids.allocate(),
            Vec3::new(g_pos.x + g_half.x + ht, wall_y, g_pos.z),
            Vec3::new(ht, hh, g_half.z),
        );
        let far_wall = Block::new(
            ids.allocate(),
            Vec3::new(g_pos.x, wall_y, g_pos.z - g_half.z - ht),
            Vec3::new(g_half.x, hh, ht),
        );
        let near_wall = Block::new(
            ids.allocate(),
            Vec3::new(g_pos.x, wall_y, g_pos.z + g_half.z + ht),
            Vec3::new(g_half.x, hh, ht),
        );

        let obstacle_half = Vec3::new(
            config.obstacle_half_extent,
            config.obstacle_half_extent,
            config.obstacle_half_extent,
        );
        let obstacles: Vec<Block> = config
            .obstacles
            .iter()
            .map(|&position| Block::new(ids.allocate(), position, obstacle_half))
            .collect();

        let enemies: Vec<Enemy> = config
            .enemies
            .iter()
            .map(|&position| {
                let mut enemy = Enemy::new(ids.allocate(), position);
                enemy.refresh_probes();
                enemy
            })
            .collect();

        let power_ups: Vec<PowerUp> = config
            .power_ups
            .iter()
            .map(|spawn| PowerUp::new(power_up_ids.allocate(), spawn.position, spawn.kind))
            .collect();

        let mut player = Player::new(config.player_spawn);
        player.refresh_probes();

        info!(
            "world configured: {} obstacles, {} enemies, {} power-ups",
            obstacles.len(),
            enemies.len(),
            power_ups.len()
        );

        Self {
            player,
            enemies,
            obstacles,
            power_ups,
            ground,
            left_wall,
            right_wall,
            far_wall,
            near_wall,
            marks: MarkBuffer::new(MAX_IMPACT_MARKS),
            gravity: config.gravity,
            enemy_mesh: MeshTemplate::cuboid(ACTOR_HALF_EXTENTS),
            ids,
            power_up_ids,
            rng: SmallRng::seed_from_u64(config.rng_seed),
            config,
        }
    }

    /// Rebuild the dynamic entities in bulk: player, enemies, and power-ups
    /// return to their configured spawns, impact marks are dropped, static
    /// geometry stays. Fresh entities get fresh ids; the sequences never
    /// rewind.
    pub fn reset(&mut self) {
        debug!("world reset");

        self.enemies = self
            .config
            .enemies
            .clone()
            .into_iter()
            .map(|position| {
                let mut enemy = Enemy::new(self.ids.allocate(), position);
                enemy.refresh_probes();
                enemy
            })
            .collect();

        self.power_ups = self
            .config
            .power_ups
            .clone()
            .into_iter()
            .map(|spawn| PowerUp::new(self.power_up_ids.allocate(), spawn.position, spawn.kind))
            .collect();

        self.player = Player::new(self.config.player_spawn);
        self.player.refresh_probes();
        self.marks.clear();
        self.rng = SmallRng::seed_from_u64(self.config.rng_seed);
    }

    /// The four boundary walls in left/right/far/near order
    pub fn walls(&self) -> [&Block; 4] {
        [&self.left_wall, &self.right_wall, &self.far_wall, &self.near_wall]
    }

    /// Find a live enemy by stable id
    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies
            .iter()
            .find(|e| e.state == EnemyState::Alive && e.id == id)
    }

    /// Find a live enemy by stable id, mutably
    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies
            .iter_mut()
            .find(|e| e.state == EnemyState::Alive && e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use approx::assert_relative_eq;

    #[test]
    fn walls_sit_flush_against_the_ground_slab() {
        let world = World::from_config(WorldConfig::default());

        let ground = world.ground.aabb();
        assert_relative_eq!(world.left_wall.aabb().max.x, ground.min.x);
        assert_relative_eq!(world.right_wall.aabb().min.x, ground.max.x);
        assert_relative_eq!(world.far_wall.aabb().max.z, ground.min.z);
        assert_relative_eq!(world.near_wall.aabb().min.z, ground.max.z);

        // Walls rest on the ground's top face.
        assert_relative_eq!(world.left_wall.aabb().min.y, ground.max.y);
    }

    #[test]
    fn every_entity_gets_a_distinct_id() {
        let world = World::from_config(WorldConfig::default());

        let mut ids: Vec<u32> = world
            .obstacles
            .iter()
            .map(|b| b.id.get())
            .chain(world.enemies.iter().map(|e| e.id.get()))
            .chain(world.walls().iter().map(|w| w.id.get()))
            .collect();
        ids.push(world.ground.id.get());

        let count = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn reset_allocates_fresh_enemy_ids() {
        let mut world = World::from_config(WorldConfig::default());
        let old_max = world.enemies.iter().map(|e| e.id).max().unwrap();

        world.reset();
        assert!(world.enemies.iter().all(|e| e.id > old_max));
        assert_eq!(world.enemies.len(), 4);
        assert!(world.marks.is_empty());
    }

    #[test]
    fn enemy_lookup_ignores_dead_entries() {
        let mut world = World::from_config(WorldConfig::default());
        let id = world.enemies[0].id;
        assert!(world.enemy(id).is_some());

        world.enemies[0].state = EnemyState::Dead;
        assert!(world.enemy(id).is_none());
    }
}
