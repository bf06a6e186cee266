//! Hitscan ray resolution
//!
//! Rays are built from an eye position toward an aim point and tested
//! against arena boxes and enemy silhouette meshes. Results carry the struck
//! entity's stable id and category, never an array index: indices shift
//! under compaction, ids do not.
//!
//! Intersection math is parametric along the ray, so directions are left
//! unnormalized (aim − origin); reported distances are converted back to
//! world units.

use crate::foundation::math::{transform_point, Mat4, Vec3};
use crate::physics::bounds::Aabb;
use crate::world::ids::EntityId;

const EPSILON: f32 = 1e-6;

/// Hard cap on hits collected by one query. Hits past the cap are silently
/// dropped; with a handful of walls, dozens of obstacles and a few enemies
/// on one line of sight this is an accepted approximation, not an error.
pub const MAX_RAY_HITS: usize = 20;

/// A ray for hitscan queries
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray; NOT normalized
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray from an eye position toward an aim point.
    ///
    /// The direction keeps the magnitude of `aim − origin`; the intersection
    /// tests work on parametric distance, so normalization is unnecessary.
    pub fn toward(origin: Vec3, aim_point: Vec3) -> Self {
        Self {
            origin,
            direction: aim_point - origin,
        }
    }

    /// Get a point along the ray at parametric distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// World-space length covered by one unit of parametric distance
    fn unit_length(&self) -> f32 {
        self.direction.magnitude()
    }

    /// Test the ray against an axis-aligned box (slab method).
    ///
    /// Returns the surface hit at the entry face, or at the exit face when
    /// the origin is inside the box. Misses, and rays whose span lies fully
    /// behind the origin, return `None`.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<RaySurfaceHit> {
        if self.direction.magnitude_squared() < EPSILON {
            return None;
        }

        let mut t_entry = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut entry_axis = 0;
        let mut exit_axis = 0;

        for axis in 0..3 {
            let o = self.origin[axis];
            let d = self.direction[axis];
            let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

            if d.abs() < EPSILON {
                // Ray parallel to this slab: must already be inside it.
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let mut t0 = (lo - o) / d;
            let mut t1 = (hi - o) / d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_entry {
                t_entry = t0;
                entry_axis = axis;
            }
            if t1 < t_exit {
                t_exit = t1;
                exit_axis = axis;
            }
        }

        if t_entry > t_exit || t_exit < 0.0 {
            return None;
        }

        let (t, axis, entering) = if t_entry >= 0.0 {
            (t_entry, entry_axis, true)
        } else {
            // Origin inside the box: report the exit face.
            (t_exit, exit_axis, false)
        };

        let mut normal = Vec3::zeros();
        normal[axis] = if entering {
            -self.direction[axis].signum()
        } else {
            self.direction[axis].signum()
        };

        Some(RaySurfaceHit {
            distance: t * self.unit_length(),
            point: self.point_at(t),
            normal,
        })
    }

    /// Möller–Trumbore ray-triangle intersection.
    ///
    /// Returns the parametric distance t if the triangle is hit in front of
    /// the origin, `None` otherwise.
    pub fn intersect_triangle(&self, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let h = self.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Ray parallel to triangle?
        if a.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / a;
        let s = self.origin - v0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * self.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t >= 0.0 {
            Some(t)
        } else {
            None
        }
    }
}

/// Geometric result of a ray-surface test
#[derive(Debug, Clone, Copy)]
pub struct RaySurfaceHit {
    /// Distance from the ray origin in world units
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
    /// The surface normal at the intersection point
    pub normal: Vec3,
}

/// A triangle hull stored in model space and transformed per query.
///
/// Enemies are targeted by silhouette rather than bounding box: a box test
/// would be too generous once the body yaws. The template is shared by every
/// enemy and placed with each enemy's current world transform
/// (translation × yaw × scale) at query time.
#[derive(Debug, Clone)]
pub struct MeshTemplate {
    triangles: Vec<[Vec3; 3]>,
    /// Radius of the bounding sphere around the model-space vertices
    pub local_bounding_radius: f32,
}

impl MeshTemplate {
    /// Build a template from model-space vertices and triangle indices
    pub fn from_vertices(vertices: &[Vec3], indices: &[u32]) -> Self {
        let mut triangles = Vec::new();
        for chunk in indices.chunks(3) {
            if chunk.len() == 3 {
                triangles.push([
                    vertices[chunk[0] as usize],
                    vertices[chunk[1] as usize],
                    vertices[chunk[2] as usize],
                ]);
            }
        }

        let mut max_radius_sq = 0.0f32;
        for vertex in vertices {
            max_radius_sq = max_radius_sq.max(vertex.magnitude_squared());
        }

        Self {
            triangles,
            local_bounding_radius: max_radius_sq.sqrt(),
        }
    }

    /// Build the box hull used as the enemy silhouette
    pub fn cuboid(half_extents: Vec3) -> Self {
        let h = half_extents;
        let vertices = [
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        let indices: [u32; 36] = [
            0, 2, 1, 0, 3, 2, // -z
            4, 5, 6, 4, 6, 7, // +z
            0, 4, 7, 0, 7, 3, // -x
            1, 2, 6, 1, 6, 5, // +x
            0, 1, 5, 0, 5, 4, // -y
            3, 7, 6, 3, 6, 2, // +y
        ];
        Self::from_vertices(&vertices, &indices)
    }

    /// Number of triangles in the hull
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Test a ray against the hull placed by `transform`.
    ///
    /// Runs a bounding-sphere pre-check, then tests every triangle in world
    /// space and keeps the closest front-facing hit.
    pub fn intersect_ray(&self, ray: &Ray, transform: &Mat4) -> Option<RaySurfaceHit> {
        let center = transform_point(transform, Vec3::zeros());
        let scale = max_column_scale(transform);
        if !ray_meets_sphere(ray, center, self.local_bounding_radius * scale) {
            return None;
        }

        let mut closest_t = f32::MAX;
        let mut closest: Option<(Vec3, Vec3)> = None;

        for tri in &self.triangles {
            let v0 = transform_point(transform, tri[0]);
            let v1 = transform_point(transform, tri[1]);
            let v2 = transform_point(transform, tri[2]);

            if let Some(t) = ray.intersect_triangle(v0, v1, v2) {
                if t < closest_t {
                    closest_t = t;
                    let mut normal = (v1 - v0).cross(&(v2 - v0));
                    if normal.magnitude_squared() > EPSILON {
                        normal = normal.normalize();
                        // Face the normal back toward the ray origin.
                        if normal.dot(&ray.direction) > 0.0 {
                            normal = -normal;
                        }
                    }
                    closest = Some((ray.point_at(t), normal));
                }
            }
        }

        closest.map(|(point, normal)| RaySurfaceHit {
            distance: closest_t * ray.unit_length(),
            point,
            normal,
        })
    }
}

/// Largest axis scale encoded in a transform's rotation/scale columns
fn max_column_scale(transform: &Mat4) -> f32 {
    let mut max_scale = 0.0f32;
    for col in 0..3 {
        let v = Vec3::new(transform[(0, col)], transform[(1, col)], transform[(2, col)]);
        max_scale = max_scale.max(v.magnitude());
    }
    max_scale
}

/// Boolean ray-sphere test used as the mesh broad phase
fn ray_meets_sphere(ray: &Ray, center: Vec3, radius: f32) -> bool {
    let len_sq = ray.direction.magnitude_squared();
    if len_sq < EPSILON {
        return false;
    }
    let oc = center - ray.origin;
    let t = (oc.dot(&ray.direction) / len_sq).max(0.0);
    let closest = ray.point_at(t);
    (center - closest).magnitude_squared() <= radius * radius
}

/// The coarse kind of a targetable entity, used to decide how a hit reacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityCategory {
    /// No entity; the sentinel category of a missed query
    #[default]
    None,
    /// Ground or boundary wall
    StaticBlock,
    /// Free-standing obstacle block
    Obstacle,
    /// Live enemy
    Enemy,
}

bitflags::bitflags! {
    /// Mask selecting which entity categories a hit query may strike
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HitFilter: u32 {
        /// Ground and boundary walls
        const STATIC_BLOCKS = 1 << 0;
        /// Obstacle blocks
        const OBSTACLES = 1 << 1;
        /// Live enemies
        const ENEMIES = 1 << 2;
    }
}

impl HitFilter {
    /// Whether a category passes this filter
    pub fn accepts(self, category: EntityCategory) -> bool {
        match category {
            EntityCategory::None => false,
            EntityCategory::StaticBlock => self.contains(Self::STATIC_BLOCKS),
            EntityCategory::Obstacle => self.contains(Self::OBSTACLES),
            EntityCategory::Enemy => self.contains(Self::ENEMIES),
        }
    }
}

impl Default for HitFilter {
    fn default() -> Self {
        Self::all()
    }
}

/// A raycast hit tagged with the struck entity's stable identity.
///
/// Produced transiently per query and never persisted beyond the frame that
/// created it; by the next frame, compaction may have moved the entity, and
/// only the id remains a safe cross-reference.
#[derive(Debug, Clone, Copy)]
pub struct IdentifiedHit {
    /// Stable id of the struck entity
    pub entity_id: EntityId,
    /// Coarse kind of the struck entity
    pub category: EntityCategory,
    /// The point of intersection in world space
    pub point: Vec3,
    /// Distance from the ray origin in world units
    pub distance: f32,
    /// The surface normal at the intersection point
    pub normal: Vec3,
}

impl IdentifiedHit {
    /// The zeroed no-hit sentinel
    pub fn none() -> Self {
        Self {
            entity_id: EntityId::NONE,
            category: EntityCategory::None,
            point: Vec3::zeros(),
            distance: 0.0,
            normal: Vec3::zeros(),
        }
    }

    /// Whether this result identifies a real entity
    pub fn is_hit(&self) -> bool {
        self.category != EntityCategory::None
    }
}

/// Bounded, reusable scratch collection for the hits of one query.
///
/// The capacity limit is explicit and testable; pushes past it are dropped
/// silently and only counted. A query with zero collected hits resolves to
/// the no-hit sentinel, not an error.
#[derive(Debug)]
pub struct HitBuffer {
    hits: Vec<IdentifiedHit>,
    capacity: usize,
    dropped: usize,
}

impl HitBuffer {
    /// Buffer with the standard capacity ([`MAX_RAY_HITS`])
    pub fn new() -> Self {
        Self::with_capacity(MAX_RAY_HITS)
    }

    /// Buffer with an explicit capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hits: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Forget all collected hits, keeping the allocation
    pub fn clear(&mut self) {
        self.hits.clear();
        self.dropped = 0;
    }

    /// Collect a hit. Returns false if the buffer is full and the hit was
    /// dropped.
    pub fn push(&mut self, hit: IdentifiedHit) -> bool {
        if self.hits.len() < self.capacity {
            self.hits.push(hit);
            true
        } else {
            self.dropped += 1;
            false
        }
    }

    /// Number of collected hits
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Whether no hits were collected
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Number of hits dropped at the capacity cap since the last clear
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Collected hits in their current order
    pub fn hits(&self) -> &[IdentifiedHit] {
        &self.hits
    }

    /// Sort collected hits by ascending distance.
    ///
    /// The sort is stable, so hits at exactly equal distance keep their
    /// insertion order (statics before obstacles before enemies).
    pub fn sort_by_distance(&mut self) {
        self.hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// The nearest collected hit, or the no-hit sentinel
    pub fn nearest(&self) -> IdentifiedHit {
        self.hits.first().copied().unwrap_or_else(IdentifiedHit::none)
    }
}

impl Default for HitBuffer {
    fn default() -> Self {
        Self::new()
    }
}
