//! Arena entities: shared physical body, player, enemy, block, power-up
//!
//! All movable entities share one body shape — position, previous position,
//! half-extents, velocity — and derive their vertical motion state from the
//! position delta of the last integration step.

use crate::foundation::math::{rad_to_deg, Mat4, Vec3, yaw_transform};
use crate::physics::bounds::Aabb;
use crate::physics::probes::ProbeRig;
use crate::world::ids::EntityId;

/// Default half-extents of a player or enemy body
pub const ACTOR_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// How long an enemy shows its hp bar after taking a hit, in seconds
pub const HP_BAR_SHOW_TIME: f32 = 4.0;

/// Vertical motion state, derived from the last integration step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    /// Vertical position unchanged since last frame
    OnGround,
    /// Moving upward
    Jumping,
    /// Moving downward
    Falling,
}

/// The physical body shared by every movable entity
#[derive(Debug, Clone, Copy)]
pub struct Body {
    /// Current position (center), owned and mutated by the entity
    pub position: Vec3,
    /// Position before the last integration step
    pub last_position: Vec3,
    /// Symmetric half-extents of the bounding box
    pub half_extents: Vec3,
    /// Current velocity
    pub velocity: Vec3,
}

impl Body {
    /// Body at rest at `position`
    pub fn new(position: Vec3, half_extents: Vec3) -> Self {
        Self {
            position,
            last_position: position,
            half_extents,
            velocity: Vec3::zeros(),
        }
    }

    /// Bounding box at the current position; recomputed on every call
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }

    /// Advance one step: apply velocity, then gravity to vertical velocity
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.last_position = self.position;
        self.position += self.velocity * dt;
        self.velocity.y -= gravity * dt;
    }

    /// Vertical motion state from the last integration step
    pub fn motion_state(&self) -> MotionState {
        if self.position.y < self.last_position.y {
            MotionState::Falling
        } else if self.position.y > self.last_position.y {
            MotionState::Jumping
        } else {
            MotionState::OnGround
        }
    }
}

/// An immovable box: ground, boundary wall, or obstacle
#[derive(Debug, Clone, Copy)]
pub struct Block {
    /// Stable identity within the collidable id sequence
    pub id: EntityId,
    /// Center position
    pub position: Vec3,
    /// Symmetric half-extents
    pub half_extents: Vec3,
}

impl Block {
    /// Create a block
    pub fn new(id: EntityId, position: Vec3, half_extents: Vec3) -> Self {
        Self {
            id,
            position,
            half_extents,
        }
    }

    /// Bounding box of the block
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.half_extents)
    }
}

/// Life state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Alive and simulated
    Alive,
    /// Dead; the world stops simulating until reset
    Dead,
}

/// The player-controlled actor
#[derive(Debug, Clone)]
pub struct Player {
    /// Physical body
    pub body: Body,
    /// Face probes, refreshed whenever the body moves
    pub probes: ProbeRig,
    /// Horizontal facing angle in degrees
    pub yaw_deg: f32,
    /// Vertical aim angle in degrees; 90 is level, clamped to [0, 180]
    pub pitch_deg: f32,
    /// Current movement speed
    pub speed: f32,
    /// Walking speed
    pub walk_speed: f32,
    /// Running speed
    pub run_speed: f32,
    /// Vertical velocity applied by a jump
    pub jump_speed: f32,
    /// Maximum hit points
    pub max_hp: i32,
    /// Current hit points
    pub hp: i32,
    /// When set, contact damage is ignored
    pub immortal: bool,
    /// Rounds remaining
    pub ammo: i32,
    /// Minimum time between automatic shots, in seconds
    pub shot_interval: f32,
    /// Time accumulated toward the next automatic shot
    pub shot_timer: f32,
    /// Life state
    pub state: PlayerState,
}

impl Player {
    /// Player with standard stats at `position`
    pub fn new(position: Vec3) -> Self {
        Self {
            body: Body::new(position, ACTOR_HALF_EXTENTS),
            probes: ProbeRig::new(ACTOR_HALF_EXTENTS),
            yaw_deg: 0.0,
            pitch_deg: 90.0,
            speed: 20.0,
            walk_speed: 20.0,
            run_speed: 40.0,
            jump_speed: 20.0,
            max_hp: 100,
            hp: 100,
            immortal: false,
            ammo: 200,
            shot_interval: 0.1,
            shot_timer: 0.0,
            state: PlayerState::Alive,
        }
    }

    /// Recompute the face probes from the current position.
    ///
    /// Required after every position mutation and before the next contact
    /// classification.
    pub fn refresh_probes(&mut self) {
        self.probes.refresh(self.body.position, self.body.half_extents);
    }

    /// Start a jump if standing on something
    pub fn jump(&mut self) {
        if self.body.motion_state() == MotionState::OnGround {
            self.body.velocity.y = self.jump_speed;
        }
    }

    /// The eye position rays are fired from
    pub fn eye_position(&self) -> Vec3 {
        self.body.position
    }
}

/// Life state of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    /// Alive, collidable, and targetable
    Alive,
    /// Flagged dead; removed by the next compaction pass
    Dead,
}

/// A hostile actor
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Stable identity within the collidable id sequence
    pub id: EntityId,
    /// Physical body
    pub body: Body,
    /// Face probes, refreshed whenever the body moves
    pub probes: ProbeRig,
    /// Horizontal facing angle in degrees; enemies always face the player
    pub yaw_deg: f32,
    /// Vertical velocity applied by a hop
    pub jump_speed: f32,
    /// Maximum hit points
    pub max_hp: i32,
    /// Current hit points
    pub hp: i32,
    /// Life state
    pub state: EnemyState,
    /// Damage dealt to the player on probe contact
    pub contact_damage: i32,
    /// Whether the player's view cone currently covers this enemy
    pub detected_by_player: bool,
    /// Seconds left showing the hp bar; counts down after a hit
    pub hp_bar_timer: f32,
    /// Render/collision scale applied in the world transform
    pub scale: Vec3,
}

impl Enemy {
    /// Enemy with standard stats at `position`
    pub fn new(id: EntityId, position: Vec3) -> Self {
        Self {
            id,
            body: Body::new(position, ACTOR_HALF_EXTENTS),
            probes: ProbeRig::new(ACTOR_HALF_EXTENTS),
            yaw_deg: 0.0,
            jump_speed: 20.0,
            max_hp: 5,
            hp: 5,
            state: EnemyState::Alive,
            contact_damage: 1,
            detected_by_player: false,
            hp_bar_timer: 0.0,
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }

    /// Recompute the face probes from the current position
    pub fn refresh_probes(&mut self) {
        self.probes.refresh(self.body.position, self.body.half_extents);
    }

    /// Start a hop if standing on something
    pub fn jump(&mut self) {
        if self.body.motion_state() == MotionState::OnGround {
            self.body.velocity.y = self.jump_speed;
        }
    }

    /// Turn to face a target position on the ground plane
    pub fn face_toward(&mut self, target: Vec3) {
        let dz = self.body.position.z - target.z;
        let dx = self.body.position.x - target.x;
        self.yaw_deg = -rad_to_deg(dz.atan2(dx));
    }

    /// Current world transform (translation × yaw × scale) used to place the
    /// silhouette mesh for hitscan queries
    pub fn world_transform(&self) -> Mat4 {
        yaw_transform(self.body.position, self.yaw_deg, self.scale)
    }

    /// Register one point of weapon damage. Returns true when this hit
    /// killed the enemy (the caller then triggers compaction).
    pub fn register_hit(&mut self) -> bool {
        if self.state != EnemyState::Alive {
            return false;
        }
        self.hp -= 1;
        self.hp_bar_timer = HP_BAR_SHOW_TIME;
        if self.hp <= 0 {
            self.state = EnemyState::Dead;
            true
        } else {
            false
        }
    }
}

/// What a power-up grants when picked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PowerUpKind {
    /// Restores 20 hp, capped at max; only consumed when the player is hurt
    Health,
    /// Grants 50 rounds
    Ammo,
}

/// Pickup state of a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpState {
    /// On the field, bouncing
    Active,
    /// Picked up; removed by the next compaction pass
    Consumed,
}

/// A bouncing pickup
#[derive(Debug, Clone)]
pub struct PowerUp {
    /// Stable identity within the power-up id sequence
    pub id: EntityId,
    /// Center position
    pub position: Vec3,
    /// Position before the last integration step
    pub last_position: Vec3,
    /// Current velocity
    pub velocity: Vec3,
    /// Collision radius
    pub radius: f32,
    /// Vertical velocity applied by each ground bounce
    pub bounce_speed: f32,
    /// What pickup grants
    pub kind: PowerUpKind,
    /// Pickup state
    pub state: PowerUpState,
}

impl PowerUp {
    /// Power-up at `position`
    pub fn new(id: EntityId, position: Vec3, kind: PowerUpKind) -> Self {
        Self {
            id,
            position,
            last_position: position,
            velocity: Vec3::zeros(),
            radius: 0.5,
            bounce_speed: 10.0,
            kind,
            state: PowerUpState::Active,
        }
    }

    /// Bounding box of the pickup sphere
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_radius(self.position, self.radius)
    }

    /// Advance one step under gravity
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.last_position = self.position;
        self.position += self.velocity * dt;
        self.velocity.y -= gravity * dt;
    }

    /// Kick back up after a ground contact
    pub fn bounce(&mut self) {
        self.velocity.y = self.bounce_speed;
    }
}
