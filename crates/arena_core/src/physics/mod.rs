//! Spatial queries: bounding volumes, face probes, contact classification,
//! and hitscan ray resolution
//!
//! Everything in this module is pure geometry over in-memory data. No query
//! suspends, allocates per frame beyond its scratch buffer, or mutates the
//! entities it inspects.

pub mod bounds;
pub mod contact;
pub mod probes;
pub mod raycast;

pub use bounds::Aabb;
pub use contact::ContactSide;
pub use probes::ProbeRig;
pub use raycast::{EntityCategory, HitBuffer, HitFilter, IdentifiedHit, MeshTemplate, Ray};
