//! # Arena Core
//!
//! Collision resolution and hitscan targeting core for a real-time 3D arena
//! shooter.
//!
//! The crate owns the spatial queries that decide movement correctness and
//! combat outcomes every frame:
//!
//! - **Bounding volumes**: axis-aligned boxes derived on demand from a
//!   center and half-extents ([`physics::bounds`])
//! - **Probe rig**: six thin face sensors per mobile actor used to classify
//!   which side of the actor touched something ([`physics::probes`])
//! - **Directional contact classification**: a single deterministic contact
//!   side per query, used by the frame step to snap positions and cancel
//!   velocity ([`physics::contact`])
//! - **Hitscan resolution**: rays against arena boxes and enemy silhouette
//!   meshes, nearest hit identified by stable entity id, with a multi-pellet
//!   spread variant ([`physics::raycast`], [`world::World::resolve_nearest_hit`])
//! - **Entity lifecycle**: dense per-kind arrays compacted by a two-pass,
//!   id-keyed removal that survives mid-frame index shifts
//!   ([`world::lifecycle`])
//!
//! Rendering, input devices, audio, camera framing, and map-file parsing are
//! external collaborators: they feed positions, extents, and aim targets in,
//! and consume corrected positions and identified hits out.
//!
//! ## Quick start
//!
//! ```
//! use arena_core::prelude::*;
//!
//! let mut world = World::from_config(WorldConfig::default());
//! world.step(1.0 / 60.0);
//!
//! let eye = world.player.body.position;
//! let aim = eye + Vec3::new(10.0, 0.0, 0.0);
//! let hit = world.resolve_nearest_hit(eye, aim);
//! if hit.is_hit() {
//!     println!("struck {:?} at distance {}", hit.category, hit.distance);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;
pub mod world;

/// Common imports for crate users
pub mod prelude {
    pub use crate::config::{ConfigError, WorldConfig};
    pub use crate::foundation::math::Vec3;
    pub use crate::physics::bounds::Aabb;
    pub use crate::physics::contact::ContactSide;
    pub use crate::physics::raycast::{EntityCategory, HitFilter, IdentifiedHit, Ray};
    pub use crate::world::{EntityId, World};
}
