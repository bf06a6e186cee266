//! Directional contact classification
//!
//! Classifies how a mobile actor overlaps a target box and reports exactly
//! one outcome. The resolver only classifies; the frame step decides how to
//! snap position and cancel velocity for each side.

use crate::physics::bounds::Aabb;
use crate::physics::probes::{ProbeFace, ProbeRig};

/// The single classified outcome of a contact query
///
/// At most one side is ever reported. In probe mode the fixed precedence
/// Left > Right > Bottom > Top > Far > Near breaks ties when two probes
/// overlap the same target (a corner clip): the first declared probe wins,
/// not the deepest penetration. The order is a declaration-order artifact
/// kept for deterministic, reproducible resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactSide {
    /// The actor's negative X face touched the target
    Left,
    /// The actor's positive X face touched the target
    Right,
    /// The actor's negative Y face touched the target (landing)
    Bottom,
    /// The actor's positive Y face touched the target (head bump)
    Top,
    /// The actor's negative Z face touched the target
    Far,
    /// The actor's positive Z face touched the target
    Near,
    /// Whole-body overlap where no side matters
    All,
    /// No overlap
    None,
}

impl ContactSide {
    /// True for the six face outcomes, false for `All`/`None`
    pub fn is_face(self) -> bool {
        !matches!(self, Self::All | Self::None)
    }
}

impl From<ProbeFace> for ContactSide {
    fn from(face: ProbeFace) -> Self {
        match face {
            ProbeFace::Left => Self::Left,
            ProbeFace::Right => Self::Right,
            ProbeFace::Bottom => Self::Bottom,
            ProbeFace::Top => Self::Top,
            ProbeFace::Far => Self::Far,
            ProbeFace::Near => Self::Near,
        }
    }
}

/// Whole-body classification: `All` on any overlap, else `None`.
///
/// Used for ground and boundary walls, where only touching matters and the
/// correction axis is known from which wall was tested.
pub fn classify_body(actor: &Aabb, target: &Aabb) -> ContactSide {
    if actor.intersects(target) {
        ContactSide::All
    } else {
        ContactSide::None
    }
}

/// Probe-mode classification: the first probe overlapping the target, in
/// fixed precedence order, or `None`.
pub fn classify_probes(rig: &ProbeRig, target: &Aabb) -> ContactSide {
    for (face, probe) in rig.in_order() {
        if probe.aabb().intersects(target) {
            return face.into();
        }
    }
    ContactSide::None
}

/// Combined entry point: probe mode when `use_probes`, whole-body otherwise
pub fn classify(actor: &Aabb, rig: &ProbeRig, target: &Aabb, use_probes: bool) -> ContactSide {
    if use_probes {
        classify_probes(rig, target)
    } else {
        classify_body(actor, target)
    }
}
