//! The per-frame update and weapon resolution
//!
//! One synchronous update pass per frame, in a fixed order: integrate
//! motion, refresh probes, correct against obstacles, refresh probes again,
//! correct against ground and walls, advance power-ups and enemies, apply
//! contact damage, and finally compact whatever died or was consumed.
//! Testing walls before obstacles have corrected the position gives subtly
//! wrong (never unsafe) behavior; the order here is the contract.

use crate::foundation::math::{deg_to_rad, Vec2, Vec3};
use crate::physics::contact::{classify_body, classify_probes, ContactSide};
use crate::physics::probes::ProbeRig;
use crate::physics::raycast::{EntityCategory, IdentifiedHit};
use crate::world::effects::{ImpactMark, PolarOffset};
use crate::world::entities::{Block, Body, EnemyState, MotionState, PlayerState, PowerUpKind, PowerUpState};
use crate::world::{lifecycle, World};
use log::debug;
use rand::Rng;

/// Extra clearance pushed below a ceiling after a head bump
const CEILING_EPSILON: f32 = 0.05;

/// Hit points restored by a health power-up
const HEALTH_PICKUP_AMOUNT: i32 = 20;

/// Rounds granted by an ammo power-up
const AMMO_PICKUP_AMOUNT: i32 = 50;

/// How far the player's view cone reaches when detecting enemies
const DETECTION_RANGE: f32 = 200.0;

/// Half-angle of the player's view cone, in degrees
const DETECTION_HALF_ANGLE_DEG: f32 = 44.0;

/// One-in-this-many chance per frame that a grounded enemy hops
const ENEMY_HOP_ODDS: u32 = 100;

impl World {
    /// Advance the simulation by `dt` seconds.
    ///
    /// Does nothing once the player is dead; [`World::reset`] restarts.
    pub fn step(&mut self, dt: f32) {
        if self.player.state == PlayerState::Dead {
            return;
        }

        // Integrate player motion, then work outward: obstacles first so the
        // corrected position is what ground and walls see.
        self.player.body.integrate(self.gravity, dt);
        self.player.pitch_deg = self.player.pitch_deg.clamp(0.0, 180.0);
        self.player.refresh_probes();

        resolve_body_obstacles(&mut self.player.body, &mut self.player.probes, &self.obstacles);
        self.player.refresh_probes();
        resolve_body_ground(&mut self.player.body, &mut self.player.probes, &self.ground);
        resolve_body_walls(
            &mut self.player.body,
            &mut self.player.probes,
            [&self.left_wall, &self.right_wall, &self.far_wall, &self.near_wall],
            false,
        );

        self.update_power_ups(dt);
        self.update_enemies(dt);
    }

    fn update_power_ups(&mut self, dt: f32) {
        let gravity = self.gravity;
        let ground = self.ground;

        for power_up in &mut self.power_ups {
            power_up.integrate(gravity, dt);
            if classify_body(&power_up.aabb(), &ground.aabb()) == ContactSide::All {
                power_up.position.y =
                    ground.position.y + ground.half_extents.y + power_up.radius;
                power_up.velocity.y = 0.0;
                power_up.bounce();
            }

            // Pickup on whole-body overlap with the player.
            if power_up.state == PowerUpState::Active
                && classify_body(&self.player.body.aabb(), &power_up.aabb()) == ContactSide::All
            {
                let consumed = match power_up.kind {
                    PowerUpKind::Health => {
                        if self.player.hp < self.player.max_hp {
                            self.player.hp =
                                (self.player.hp + HEALTH_PICKUP_AMOUNT).min(self.player.max_hp);
                            true
                        } else {
                            false
                        }
                    }
                    PowerUpKind::Ammo => {
                        self.player.ammo += AMMO_PICKUP_AMOUNT;
                        true
                    }
                };
                if consumed {
                    power_up.state = PowerUpState::Consumed;
                    debug!("power-up {} consumed", power_up.id.get());
                }
            }
        }

        lifecycle::compact(&mut self.power_ups, |p| p.id, |p| p.state == PowerUpState::Consumed);
    }

    fn update_enemies(&mut self, dt: f32) {
        let gravity = self.gravity;
        let ground = self.ground;
        let player_position = self.player.body.position;

        for enemy in &mut self.enemies {
            if enemy.state != EnemyState::Alive {
                continue;
            }

            if enemy.body.motion_state() == MotionState::OnGround
                && self.rng.gen_range(0..=ENEMY_HOP_ODDS) == 0
            {
                enemy.jump();
            }

            enemy.body.integrate(gravity, dt);
            enemy.face_toward(player_position);
            if enemy.hp_bar_timer > 0.0 {
                enemy.hp_bar_timer = (enemy.hp_bar_timer - dt).max(0.0);
            }

            enemy.refresh_probes();
            resolve_body_obstacles(&mut enemy.body, &mut enemy.probes, &self.obstacles);
            resolve_body_ground(&mut enemy.body, &mut enemy.probes, &ground);
            resolve_body_walls(
                &mut enemy.body,
                &mut enemy.probes,
                [&self.left_wall, &self.right_wall, &self.far_wall, &self.near_wall],
                true,
            );

            // Contact with the player: damage plus positional separation,
            // no knockback. The player's probes decide the side.
            let side = classify_probes(&self.player.probes, &enemy.body.aabb());
            if side.is_face() {
                if !self.player.immortal {
                    self.player.hp -= enemy.contact_damage;
                    if self.player.hp <= 0 {
                        self.player.hp = 0;
                        self.player.state = PlayerState::Dead;
                        debug!("player killed by contact with enemy {}", enemy.id.get());
                    }
                }
                apply_side_correction(
                    &mut self.player.body,
                    side,
                    enemy.body.position,
                    enemy.body.half_extents,
                );
                self.player
                    .probes
                    .refresh(self.player.body.position, self.player.body.half_extents);
            }

            enemy.detected_by_player = view_cone_covers(
                player_position,
                self.player.yaw_deg,
                enemy.body.position,
            );
        }
    }

    /// Fire one hitscan round from `origin` toward `aim_point`.
    ///
    /// Resolves the nearest hit, spends a round, applies one point of damage
    /// if the hit id still resolves to a live enemy, and leaves an impact
    /// mark. Returns the resolved hit; the sentinel when out of ammo.
    pub fn fire_single(&mut self, origin: Vec3, aim_point: Vec3) -> IdentifiedHit {
        if self.player.state == PlayerState::Dead || self.player.ammo <= 0 {
            return IdentifiedHit::none();
        }

        self.player.ammo -= 1;
        let hit = self.resolve_nearest_hit(origin, aim_point);
        self.apply_hit(hit);
        hit
    }

    /// Automatic fire: like [`World::fire_single`] but gated by the player's
    /// shot interval. Returns `None` while the cadence timer has not come up.
    pub fn fire_burst(&mut self, origin: Vec3, aim_point: Vec3, dt: f32) -> Option<IdentifiedHit> {
        self.player.shot_timer += dt;
        if self.player.shot_timer < self.player.shot_interval {
            return None;
        }
        self.player.shot_timer = 0.0;
        Some(self.fire_single(origin, aim_point))
    }

    /// Fire a pellet volley: one spread query, then every pellet applied
    /// independently while rounds remain. Multiple pellets striking the same
    /// enemy each deal their own damage. Returns the per-pellet hits, empty
    /// when the volley could not fire at all.
    pub fn fire_spread(
        &mut self,
        origin: Vec3,
        aim_point: Vec3,
        pellet_count: usize,
    ) -> Vec<IdentifiedHit> {
        if self.player.state == PlayerState::Dead || self.player.ammo <= 0 {
            return Vec::new();
        }

        let hits = self.resolve_spread_hits(origin, aim_point, pellet_count);
        for hit in &hits {
            if self.player.ammo <= 0 {
                break;
            }
            self.player.ammo -= 1;
            self.apply_hit(*hit);
        }
        hits
    }

    /// Apply the consequences of one resolved hit.
    ///
    /// The id is re-validated against the live array first: a hit whose
    /// enemy was already removed is a damage no-op and the mark falls back
    /// to the embedded variant.
    fn apply_hit(&mut self, hit: IdentifiedHit) {
        if !hit.is_hit() {
            return;
        }

        if hit.category == EntityCategory::Enemy {
            let mut killed = false;
            let mut mark = Some(ImpactMark::Embedded { point: hit.point });

            if let Some(enemy) = self
                .enemies
                .iter_mut()
                .find(|e| e.state == EnemyState::Alive && e.id == hit.entity_id)
            {
                killed = enemy.register_hit();
                mark = if killed {
                    // The enemy is gone; nothing to pin a mark on.
                    None
                } else {
                    Some(ImpactMark::AttachedToEnemy {
                        enemy: enemy.id,
                        offset: PolarOffset::from_impact(enemy, hit.point),
                    })
                };
            }

            if killed {
                debug!("enemy {} killed", hit.entity_id.get());
                self.retire_dead_enemies();
            }
            if let Some(mark) = mark {
                self.marks.push(mark);
            }
        } else {
            self.marks.push(ImpactMark::Embedded { point: hit.point });
        }
    }

    /// Remove enemies flagged dead, keeping the array dense and ordered
    pub fn retire_dead_enemies(&mut self) {
        lifecycle::compact(&mut self.enemies, |e| e.id, |e| e.state == EnemyState::Dead);
    }
}

/// Snap a body flush against the struck face of a target box and cancel the
/// matching velocity component where the contact is vertical
fn apply_side_correction(body: &mut Body, side: ContactSide, target_center: Vec3, target_half: Vec3) {
    match side {
        ContactSide::Left => {
            body.position.x = target_center.x + target_half.x + body.half_extents.x;
        }
        ContactSide::Right => {
            body.position.x = target_center.x - target_half.x - body.half_extents.x;
        }
        ContactSide::Bottom => {
            body.position.y = target_center.y + target_half.y + body.half_extents.y;
            body.velocity.y = 0.0;
        }
        ContactSide::Top => {
            body.position.y =
                target_center.y - target_half.y - body.half_extents.y - CEILING_EPSILON;
            body.velocity.y = 0.0;
        }
        ContactSide::Far => {
            body.position.z = target_center.z + target_half.z + body.half_extents.z;
        }
        ContactSide::Near => {
            body.position.z = target_center.z - target_half.z - body.half_extents.z;
        }
        ContactSide::All | ContactSide::None => {}
    }
}

/// Probe-mode correction against every obstacle. Probes are refreshed after
/// each face correction so later obstacles in the same pass see the moved
/// position.
fn resolve_body_obstacles(body: &mut Body, probes: &mut ProbeRig, obstacles: &[Block]) {
    for obstacle in obstacles {
        let side = classify_probes(probes, &obstacle.aabb());
        if side.is_face() {
            apply_side_correction(body, side, obstacle.position, obstacle.half_extents);
            probes.refresh(body.position, body.half_extents);
        }
    }
}

/// Whole-body correction against the ground: any overlap lands the body on
/// the top face and zeroes vertical velocity
fn resolve_body_ground(body: &mut Body, probes: &mut ProbeRig, ground: &Block) {
    if classify_body(&body.aabb(), &ground.aabb()) == ContactSide::All {
        body.position.y = ground.position.y + ground.half_extents.y + body.half_extents.y;
        body.velocity.y = 0.0;
        probes.refresh(body.position, body.half_extents);
    }
}

/// Whole-body correction against the four boundary walls, in
/// left/right/far/near order. `bounce` reverses the matching velocity
/// component, the behavior of enemies patrolling the arena.
fn resolve_body_walls(body: &mut Body, probes: &mut ProbeRig, walls: [&Block; 4], bounce: bool) {
    let [left, right, far, near] = walls;

    if classify_body(&body.aabb(), &left.aabb()) == ContactSide::All {
        body.position.x = left.position.x + left.half_extents.x + body.half_extents.x;
        if bounce {
            body.velocity.x = -body.velocity.x;
        }
        probes.refresh(body.position, body.half_extents);
    }
    if classify_body(&body.aabb(), &right.aabb()) == ContactSide::All {
        body.position.x = right.position.x - right.half_extents.x - body.half_extents.x;
        if bounce {
            body.velocity.x = -body.velocity.x;
        }
        probes.refresh(body.position, body.half_extents);
    }
    if classify_body(&body.aabb(), &far.aabb()) == ContactSide::All {
        body.position.z = far.position.z + far.half_extents.z + body.half_extents.z;
        if bounce {
            body.velocity.z = -body.velocity.z;
        }
        probes.refresh(body.position, body.half_extents);
    }
    if classify_body(&body.aabb(), &near.aabb()) == ContactSide::All {
        body.position.z = near.position.z - near.half_extents.z - body.half_extents.z;
        if bounce {
            body.velocity.z = -body.velocity.z;
        }
        probes.refresh(body.position, body.half_extents);
    }
}

/// Whether the player's 2D view cone covers a point on the ground plane.
///
/// The cone is the triangle between the player and two rays swung
/// [`DETECTION_HALF_ANGLE_DEG`] to either side of the facing direction.
fn view_cone_covers(player_position: Vec3, yaw_deg: f32, target: Vec3) -> bool {
    let apex = Vec2::new(player_position.x, player_position.z);
    let point = Vec2::new(target.x, target.z);

    let edge = |angle_deg: f32| {
        let a = deg_to_rad(angle_deg);
        apex + Vec2::new(a.cos(), -a.sin()) * DETECTION_RANGE
    };
    let lhs = edge(yaw_deg + DETECTION_HALF_ANGLE_DEG);
    let rhs = edge(yaw_deg - DETECTION_HALF_ANGLE_DEG);

    point_in_triangle(point, apex, lhs, rhs)
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let sign = |p1: Vec2, p2: Vec2, p3: Vec2| {
        (p1.x - p3.x) * (p2.y - p3.y) - (p2.x - p3.x) * (p1.y - p3.y)
    };

    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ArenaConfig, WorldConfig};
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    /// Ground slab centered at the origin with half-extents (50, 1, 50),
    /// nothing else on the field.
    fn flat_arena() -> WorldConfig {
        WorldConfig {
            arena: ArenaConfig {
                ground_position: Vec3::zeros(),
                ground_half_extents: Vec3::new(50.0, 1.0, 50.0),
                ..ArenaConfig::default()
            },
            player_spawn: Vec3::new(0.0, 5.0, 0.0),
            obstacles: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            ..WorldConfig::default()
        }
    }

    #[test]
    fn falling_player_settles_on_the_ground_without_jitter() {
        crate::foundation::logging::init_for_tests();
        let mut world = World::from_config(flat_arena());
        let rest_y = world.ground.aabb().max.y + world.player.body.half_extents.y;

        // Long enough for the fall from y=5 to cross the top face.
        for _ in 0..120 {
            world.step(DT);
        }

        assert_relative_eq!(world.player.body.position.y, rest_y, epsilon = 1e-4);
        assert_relative_eq!(world.player.body.velocity.y, 0.0);

        // And it stays put across subsequent frames.
        for _ in 0..60 {
            world.step(DT);
            assert_relative_eq!(world.player.body.position.y, rest_y, epsilon = 1e-4);
        }
    }

    #[test]
    fn landing_on_an_obstacle_zeroes_vertical_velocity() {
        let mut config = flat_arena();
        config.obstacles = vec![Vec3::new(0.0, 5.0, 0.0)];
        config.player_spawn = Vec3::new(0.0, 9.0, 0.0);
        let mut world = World::from_config(config);

        for _ in 0..120 {
            world.step(DT);
        }

        // Resting on the obstacle's top face, not the ground.
        let obstacle_top = world.obstacles[0].aabb().max.y;
        assert_relative_eq!(
            world.player.body.position.y,
            obstacle_top + world.player.body.half_extents.y,
            epsilon = 1e-4
        );
        assert_relative_eq!(world.player.body.velocity.y, 0.0);
    }

    #[test]
    fn sideways_push_into_an_obstacle_snaps_flush() {
        let mut config = flat_arena();
        config.obstacles = vec![Vec3::new(5.0, 2.0, 0.0)];
        config.player_spawn = Vec3::new(1.0, 2.0, 0.0);
        let mut world = World::from_config(config);

        // Drive the player into the obstacle's left face.
        for _ in 0..60 {
            world.player.body.velocity.x = 10.0;
            world.step(DT);
        }

        let expected = world.obstacles[0].position.x
            - world.obstacles[0].half_extents.x
            - world.player.body.half_extents.x;
        assert_relative_eq!(world.player.body.position.x, expected, epsilon = 1e-4);
        // Sliding is free: horizontal velocity is left alone.
        assert_relative_eq!(world.player.body.velocity.x, 10.0);
    }

    #[test]
    fn enemies_bounce_off_boundary_walls() {
        let mut config = flat_arena();
        config.enemies = vec![Vec3::new(-48.0, 1.0, 0.0)];
        let mut world = World::from_config(config);

        world.enemies[0].body.velocity.x = -30.0;
        for _ in 0..30 {
            world.step(DT);
        }

        let enemy = &world.enemies[0];
        assert!(enemy.body.velocity.x > 0.0, "wall contact reverses course");
        let wall_face = world.left_wall.aabb().max.x;
        assert!(enemy.body.position.x >= wall_face + enemy.body.half_extents.x - 1e-3);
    }

    #[test]
    fn contact_with_an_enemy_hurts_and_separates_the_player() {
        let mut config = flat_arena();
        config.player_spawn = Vec3::new(0.0, 1.0, 0.0);
        config.enemies = vec![Vec3::new(1.5, 1.0, 0.0)];
        let mut world = World::from_config(config);
        let hp_before = world.player.hp;

        world.step(DT);

        assert!(world.player.hp < hp_before);
        // Separated: the boxes no longer interpenetrate beyond the probes.
        let gap = (world.enemies[0].body.position.x - world.player.body.position.x).abs();
        assert!(gap >= 2.0 - 1e-3);
    }

    #[test]
    fn immortal_player_takes_no_contact_damage() {
        let mut config = flat_arena();
        config.player_spawn = Vec3::new(0.0, 1.0, 0.0);
        config.enemies = vec![Vec3::new(1.5, 1.0, 0.0)];
        let mut world = World::from_config(config);
        world.player.immortal = true;

        world.step(DT);
        assert_eq!(world.player.hp, world.player.max_hp);
    }

    #[test]
    fn shooting_an_enemy_applies_damage_by_id() {
        let mut config = flat_arena();
        config.player_spawn = Vec3::new(0.0, 1.0, 0.0);
        config.enemies = vec![Vec3::new(10.0, 1.0, 0.0)];
        let mut world = World::from_config(config);
        let enemy_id = world.enemies[0].id;
        let hp_before = world.enemies[0].hp;

        let origin = world.player.eye_position();
        let hit = world.fire_single(origin, Vec3::new(20.0, 1.0, 0.0));

        assert_eq!(hit.category, EntityCategory::Enemy);
        assert_eq!(hit.entity_id, enemy_id);
        assert_eq!(world.enemies[0].hp, hp_before - 1);
        assert_eq!(world.player.ammo, 199);
        // The surviving enemy carries the mark.
        assert!(matches!(
            world.marks.marks()[0],
            ImpactMark::AttachedToEnemy { enemy, .. } if enemy == enemy_id
        ));
    }

    #[test]
    fn lethal_shot_compacts_the_enemy_array() {
        let mut config = flat_arena();
        config.player_spawn = Vec3::new(0.0, 1.0, 0.0);
        config.enemies = vec![Vec3::new(10.0, 1.0, 0.0), Vec3::new(10.0, 1.0, 5.0)];
        let mut world = World::from_config(config);
        world.enemies[0].hp = 1;
        let doomed = world.enemies[0].id;
        let survivor = world.enemies[1].id;

        let origin = world.player.eye_position();
        let hit = world.fire_single(origin, Vec3::new(20.0, 1.0, 0.0));

        assert_eq!(hit.entity_id, doomed);
        assert_eq!(world.enemies.len(), 1);
        assert_eq!(world.enemies[0].id, survivor);
        // A kill leaves no mark to pin.
        assert!(world.marks.is_empty());
    }

    #[test]
    fn stale_hit_id_is_a_damage_no_op() {
        let mut config = flat_arena();
        config.player_spawn = Vec3::new(0.0, 1.0, 0.0);
        config.enemies = vec![Vec3::new(10.0, 1.0, 0.0)];
        let mut world = World::from_config(config);

        let origin = world.player.eye_position();
        let hit = world.resolve_nearest_hit(origin, Vec3::new(20.0, 1.0, 0.0));
        assert_eq!(hit.category, EntityCategory::Enemy);

        // The enemy is removed between the query and its use.
        world.enemies[0].state = EnemyState::Dead;
        world.retire_dead_enemies();

        world.apply_hit(hit);
        assert!(world.enemies.is_empty());
        // The mark falls back to the world at the impact point.
        assert!(matches!(
            world.marks.marks()[0],
            ImpactMark::Embedded { .. }
        ));
    }

    #[test]
    fn shots_hit_the_nearer_obstacle_before_the_enemy_behind_it() {
        let mut config = flat_arena();
        config.player_spawn = Vec3::new(0.0, 1.0, 0.0);
        config.obstacles = vec![Vec3::new(5.0, 1.0, 0.0)];
        config.enemies = vec![Vec3::new(10.0, 1.0, 0.0)];
        let mut world = World::from_config(config);
        let hp_before = world.enemies[0].hp;

        let origin = world.player.eye_position();
        let hit = world.fire_single(origin, Vec3::new(20.0, 1.0, 0.0));

        assert_eq!(hit.category, EntityCategory::Obstacle);
        assert_eq!(world.enemies[0].hp, hp_before, "cover absorbs the shot");
    }

    #[test]
    fn burst_fire_obeys_the_cadence_timer() {
        let mut config = flat_arena();
        config.player_spawn = Vec3::new(0.0, 1.0, 0.0);
        let mut world = World::from_config(config);
        let origin = world.player.eye_position();
        let aim = Vec3::new(20.0, 1.0, 0.0);

        // 0.1s interval at 60Hz: shots land every sixth frame at most.
        let mut fired = 0;
        for _ in 0..60 {
            if world.fire_burst(origin, aim, DT).is_some() {
                fired += 1;
            }
        }
        assert!(fired >= 9 && fired <= 10, "fired {fired} shots in one second");
    }

    #[test]
    fn out_of_ammo_fires_nothing() {
        let mut config = flat_arena();
        config.enemies = vec![Vec3::new(10.0, 1.0, 0.0)];
        let mut world = World::from_config(config);
        world.player.ammo = 0;

        let origin = world.player.eye_position();
        let hit = world.fire_single(origin, Vec3::new(20.0, 1.0, 0.0));
        assert!(!hit.is_hit());
        assert!(world.fire_spread(origin, Vec3::new(20.0, 1.0, 0.0), 8).is_empty());
        assert_eq!(world.enemies[0].hp, world.enemies[0].max_hp);
    }

    #[test]
    fn spread_volley_spends_at_most_remaining_ammo() {
        let mut config = flat_arena();
        config.player_spawn = Vec3::new(0.0, 1.0, 0.0);
        let mut world = World::from_config(config);
        world.player.ammo = 3;

        let origin = world.player.eye_position();
        let hits = world.fire_spread(origin, Vec3::new(20.0, 1.0, 0.0), 8);

        assert_eq!(hits.len(), 8, "the query itself is per-pellet complete");
        assert_eq!(world.player.ammo, 0, "but only three rounds existed");
    }

    #[test]
    fn health_power_up_only_consumed_when_hurt() {
        let mut config = flat_arena();
        config.player_spawn = Vec3::new(0.0, 1.0, 0.0);
        config.power_ups = vec![crate::config::PowerUpSpawn {
            position: Vec3::new(0.0, 1.0, 0.0),
            kind: PowerUpKind::Health,
        }];
        let mut world = World::from_config(config);

        // At full health the pickup stays on the field.
        world.step(DT);
        assert_eq!(world.power_ups.len(), 1);

        world.player.hp = 50;
        world.step(DT);
        assert_eq!(world.power_ups.len(), 0, "consumed and compacted");
        assert_eq!(world.player.hp, 70);
    }

    #[test]
    fn ammo_power_up_grants_rounds_and_compacts() {
        let mut config = flat_arena();
        config.player_spawn = Vec3::new(0.0, 1.0, 0.0);
        config.power_ups = vec![crate::config::PowerUpSpawn {
            position: Vec3::new(0.0, 1.0, 0.0),
            kind: PowerUpKind::Ammo,
        }];
        let mut world = World::from_config(config);
        let ammo_before = world.player.ammo;

        world.step(DT);
        assert_eq!(world.player.ammo, ammo_before + AMMO_PICKUP_AMOUNT);
        assert!(world.power_ups.is_empty());
    }

    #[test]
    fn dead_player_freezes_the_simulation() {
        let mut world = World::from_config(flat_arena());
        world.player.state = PlayerState::Dead;
        let y_before = world.player.body.position.y;

        world.step(DT);
        assert_relative_eq!(world.player.body.position.y, y_before);
    }

    #[test]
    fn view_cone_detection_tracks_facing() {
        // Facing +x with yaw 0: a target ahead is covered, behind is not.
        assert!(view_cone_covers(
            Vec3::zeros(),
            0.0,
            Vec3::new(10.0, 0.0, 0.0)
        ));
        assert!(!view_cone_covers(
            Vec3::zeros(),
            0.0,
            Vec3::new(-10.0, 0.0, 0.0)
        ));
        // Swinging the yaw 180 degrees flips the covered side.
        assert!(view_cone_covers(
            Vec3::zeros(),
            180.0,
            Vec3::new(-10.0, 0.0, 0.0)
        ));
    }
}
