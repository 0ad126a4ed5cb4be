//! Triangle arena
//!
//! Level geometry lives in a flat vector so the collision core can borrow it
//! as a slice. Removal only tombstones a slot; ids stay stable for the life
//! of the arena and the per-group index is rebuilt on demand.

use std::collections::BTreeMap;
use std::fmt;

use crate::foundation::math::{Vec3, Vec3Ext};
use crate::physics::{BoundingSphere, Triangle};
use super::error::LevelError;

/// Stable handle to a triangle stored in a [`TriangleArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TriangleId(usize);

impl TriangleId {
    /// Slot index in [`TriangleArena::triangles`]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TriangleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena of obstacle triangles with an opaque group key per slot
#[derive(Debug, Clone, Default)]
pub struct TriangleArena {
    triangles: Vec<Triangle>,
    groups: Vec<u32>,
}

impl TriangleArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a triangle under `group`
    pub fn insert(&mut self, triangle: Triangle, group: u32) -> Result<TriangleId, LevelError> {
        let finite = triangle.vertices().iter().all(Vec3Ext::all_finite) && triangle.normal.all_finite();
        if !finite {
            log::warn!("Rejected triangle with non-finite data: {:?}", triangle);
            return Err(LevelError::InvalidTriangle);
        }
        if triangle.is_degenerate() {
            log::warn!("Rejected degenerate triangle: {:?}", triangle);
            return Err(LevelError::DegenerateTriangle);
        }

        let id = TriangleId(self.triangles.len());
        self.triangles.push(Triangle { valid: true, ..triangle });
        self.groups.push(group);
        log::debug!("Inserted triangle {} in group {}", id, group);
        Ok(id)
    }

    /// Tombstone a triangle so it no longer takes part in collision
    pub fn remove(&mut self, id: TriangleId) -> Result<(), LevelError> {
        let triangle = self
            .triangles
            .get_mut(id.0)
            .ok_or(LevelError::UnknownTriangle(id))?;
        if !triangle.valid {
            return Err(LevelError::AlreadyRemoved(id));
        }
        triangle.valid = false;
        log::debug!("Removed triangle {}", id);
        Ok(())
    }

    /// Look up a triangle, tombstoned or not
    pub fn get(&self, id: TriangleId) -> Option<&Triangle> {
        self.triangles.get(id.0)
    }

    /// Group key a triangle was inserted with
    pub fn group(&self, id: TriangleId) -> Option<u32> {
        self.groups.get(id.0).copied()
    }

    /// Every slot including tombstones, in insertion order
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Live triangles with their ids
    pub fn live(&self) -> impl Iterator<Item = (TriangleId, &Triangle)> {
        self.triangles
            .iter()
            .enumerate()
            .filter(|(_, triangle)| triangle.valid)
            .map(|(index, triangle)| (TriangleId(index), triangle))
    }

    /// Number of slots, tombstones included
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True if nothing was ever inserted
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of triangles that still collide
    pub fn live_count(&self) -> usize {
        self.live().count()
    }

    /// Live triangle ids per group, ordered by group key
    pub fn group_index(&self) -> BTreeMap<u32, Vec<TriangleId>> {
        let mut index: BTreeMap<u32, Vec<TriangleId>> = BTreeMap::new();
        for (id, _) in self.live() {
            index.entry(self.groups[id.0]).or_default().push(id);
        }
        index
    }

    /// Split live triangles larger than `max_area`
    ///
    /// Each oversized triangle is cut at the midpoint of its longest side
    /// into two halves that keep its winding, normal and group; the split
    /// triangle is tombstoned. With `recursive` the halves are split again until no
    /// live triangle exceeds `max_area`. Returns the number of triangles
    /// added.
    pub fn split_triangles(&mut self, max_area: f64, recursive: bool) -> Result<usize, LevelError> {
        if !(max_area.is_finite() && max_area > 0.0) {
            return Err(LevelError::InvalidSplitArea(max_area));
        }

        let mut added = 0;
        loop {
            let oversized: Vec<usize> = self
                .live()
                .filter(|(_, triangle)| triangle.area() > max_area)
                .map(|(id, _)| id.0)
                .collect();
            if oversized.is_empty() {
                break;
            }

            for index in oversized {
                let source = self.triangles[index];
                let group = self.groups[index];
                self.triangles[index].valid = false;
                for half in split_longest_side(&source) {
                    self.triangles.push(half);
                    self.groups.push(group);
                    added += 1;
                }
            }

            if !recursive {
                break;
            }
        }

        log::debug!("Split pass added {} triangles ({} live)", added, self.live_count());
        Ok(added)
    }

    /// Sphere enclosing every live vertex
    pub fn bounds(&self) -> Option<BoundingSphere> {
        BoundingSphere::enclosing(self.live().flat_map(|(_, triangle)| [&triangle.a, &triangle.b, &triangle.c]))
    }
}

fn split_longest_side(triangle: &Triangle) -> [Triangle; 2] {
    let v = triangle.vertices();
    let side_length = |i: usize| (v[(i + 1) % 3] - v[i]).magnitude_squared();

    let mut longest = 0;
    for i in 1..3 {
        if side_length(i) > side_length(longest) {
            longest = i;
        }
    }

    let start = v[longest];
    let end = v[(longest + 1) % 3];
    let apex = v[(longest + 2) % 3];
    let midpoint: Vec3 = (start + end) * 0.5;

    [
        Triangle::with_normal(start, midpoint, apex, triangle.normal),
        Triangle::with_normal(midpoint, end, apex, triangle.normal),
    ]
}
