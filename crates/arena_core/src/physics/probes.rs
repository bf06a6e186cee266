//! Face-aligned collision probes
//!
//! Each mobile actor carries six thin sub-boxes glued flush against its
//! faces. A probe is much thinner than the actor along its own face-normal
//! axis, so only the intended face can register a contact, and slightly
//! narrower than the actor on the other two axes, so protruding geometry
//! cannot clip a neighboring probe.
//!
//! Probes have no lifecycle of their own. They are recomputed from the
//! actor's position every time it moves and die with the actor.

use crate::foundation::math::Vec3;
use crate::physics::bounds::Aabb;

/// Probe thickness along its face-normal axis (full extent)
pub const PROBE_THICKNESS: f32 = 1.0;

/// How much narrower than the actor a probe is on its two lateral axes
/// (full extent)
pub const PROBE_SHRINK: f32 = 0.7;

/// The face of the actor a probe is glued to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFace {
    /// Negative X face
    Left,
    /// Positive X face
    Right,
    /// Negative Y face
    Bottom,
    /// Positive Y face
    Top,
    /// Negative Z face
    Far,
    /// Positive Z face
    Near,
}

/// A single face probe: a thin box with its own center and half-extents
#[derive(Debug, Clone, Copy)]
pub struct Probe {
    /// Probe center in world space, recomputed on every refresh
    pub center: Vec3,
    /// Probe half-extents, fixed at rig construction
    pub half_extents: Vec3,
}

impl Probe {
    /// The probe's bounding box
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_half_extents(self.center, self.half_extents)
    }
}

/// The six face probes of one mobile actor
#[derive(Debug, Clone)]
pub struct ProbeRig {
    /// Probe on the negative X face
    pub left: Probe,
    /// Probe on the positive X face
    pub right: Probe,
    /// Probe on the negative Y face
    pub bottom: Probe,
    /// Probe on the positive Y face
    pub top: Probe,
    /// Probe on the negative Z face
    pub far: Probe,
    /// Probe on the positive Z face
    pub near: Probe,
}

impl ProbeRig {
    /// Build a rig sized for an actor with the given half-extents.
    ///
    /// Probe centers start at the origin; call [`ProbeRig::refresh`] before
    /// the first contact test.
    pub fn new(actor_half_extents: Vec3) -> Self {
        let h = actor_half_extents;
        let t = PROBE_THICKNESS * 0.5;
        let s = PROBE_SHRINK * 0.5;

        let lr = Vec3::new(t, h.y - s, h.z - s);
        let bt = Vec3::new(h.x - s, t, h.z - s);
        let fn_ = Vec3::new(h.x - s, h.y - s, t);

        let probe = |half_extents| Probe {
            center: Vec3::zeros(),
            half_extents,
        };

        Self {
            left: probe(lr),
            right: probe(lr),
            bottom: probe(bt),
            top: probe(bt),
            far: probe(fn_),
            near: probe(fn_),
        }
    }

    /// Recenter every probe against the actor's current position.
    ///
    /// Must be called after any position mutation and before the next
    /// contact classification; stale probes produce a wrong (but
    /// well-defined) side.
    pub fn refresh(&mut self, position: Vec3, actor_half_extents: Vec3) {
        let h = actor_half_extents;

        self.left.center = Vec3::new(
            position.x - h.x + self.left.half_extents.x,
            position.y,
            position.z,
        );
        self.right.center = Vec3::new(
            position.x + h.x - self.right.half_extents.x,
            position.y,
            position.z,
        );
        self.bottom.center = Vec3::new(
            position.x,
            position.y - h.y + self.bottom.half_extents.y,
            position.z,
        );
        self.top.center = Vec3::new(
            position.x,
            position.y + h.y - self.top.half_extents.y,
            position.z,
        );
        self.far.center = Vec3::new(
            position.x,
            position.y,
            position.z - h.z + self.far.half_extents.z,
        );
        self.near.center = Vec3::new(
            position.x,
            position.y,
            position.z + h.z - self.near.half_extents.z,
        );
    }

    /// Probes in classification precedence order
    pub fn in_order(&self) -> [(ProbeFace, &Probe); 6] {
        [
            (ProbeFace::Left, &self.left),
            (ProbeFace::Right, &self.right),
            (ProbeFace::Bottom, &self.bottom),
            (ProbeFace::Top, &self.top),
            (ProbeFace::Far, &self.far),
            (ProbeFace::Near, &self.near),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn probes_sit_flush_against_their_faces() {
        let half = Vec3::new(1.0, 1.0, 1.0);
        let mut rig = ProbeRig::new(half);
        let pos = Vec3::new(10.0, 5.0, -3.0);
        rig.refresh(pos, half);

        // The left probe's outer face coincides with the actor's left face.
        let left_box = rig.left.aabb();
        assert_relative_eq!(left_box.min.x, pos.x - half.x);

        let bottom_box = rig.bottom.aabb();
        assert_relative_eq!(bottom_box.min.y, pos.y - half.y);

        let near_box = rig.near.aabb();
        assert_relative_eq!(near_box.max.z, pos.z + half.z);
    }

    #[test]
    fn lateral_axes_are_narrower_than_the_actor() {
        let half = Vec3::new(1.0, 1.0, 1.0);
        let rig = ProbeRig::new(half);

        assert!(rig.left.half_extents.y < half.y);
        assert!(rig.left.half_extents.z < half.z);
        assert!(rig.bottom.half_extents.x < half.x);
        assert_relative_eq!(rig.left.half_extents.x, PROBE_THICKNESS * 0.5);
    }

    #[test]
    fn refresh_tracks_position_changes() {
        let half = Vec3::new(1.0, 1.0, 1.0);
        let mut rig = ProbeRig::new(half);
        rig.refresh(Vec3::zeros(), half);
        let before = rig.top.center;

        rig.refresh(Vec3::new(0.0, 2.0, 0.0), half);
        assert_relative_eq!(rig.top.center.y, before.y + 2.0);
    }
}
