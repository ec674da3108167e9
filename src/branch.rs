//! Branch transform derivation from recorded turtle points.

use crate::interpreter::PointRecord;
use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The derived transform for one renderable branch segment.
///
/// Scale follows the unit-cylinder convention: a primitive of height 2
/// centered on its own origin, so the Y scale is half the segment length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchDescriptor {
    /// World position of the segment's proximal end; also the transform
    /// position handed to the renderer.
    pub start: Vec3,

    /// World position of the segment's distal end.
    pub end: Vec3,

    /// Euclidean distance between `start` and `end`.
    pub length: f32,

    /// Cylinder radius, proportional to `length` so longer segments read
    /// as thicker trunk pieces.
    pub radius: f32,

    /// World rotation derived from the distal point's orientation angles.
    pub rotation: Quat,

    /// Non-uniform scale `(radius, length / 2, radius)`.
    pub scale: Vec3,
}

/// Converts consecutive point pairs into [`BranchDescriptor`]s.
#[derive(Clone, Copy, Debug)]
pub struct BranchBuilder {
    /// Radius as a fraction of segment length.
    pub radius_factor: f32,
}

impl Default for BranchBuilder {
    fn default() -> Self {
        Self { radius_factor: 0.1 }
    }
}

impl BranchBuilder {
    pub fn new(radius_factor: f32) -> Self {
        Self { radius_factor }
    }

    /// Derives one descriptor per point pair, in order.
    ///
    /// Points are paired with a stride of 2 at indices (0,2), (2,4), … —
    /// not (0,1),(2,3) — coupling each drawn segment's start with the next
    /// segment's start so consecutive branch midpoints chain into a
    /// continuous trunk. A pair needs `points[i + 2]` to exist; dangling
    /// tail points are dropped, and fewer than three points produce no
    /// descriptors at all.
    pub fn build(&self, points: &[PointRecord]) -> Vec<BranchDescriptor> {
        let mut branches = Vec::new();
        let mut i = 0;
        while i + 2 < points.len() {
            branches.push(self.descriptor(&points[i], &points[i + 2]));
            i += 2;
        }
        branches
    }

    fn descriptor(&self, p1: &PointRecord, p2: &PointRecord) -> BranchDescriptor {
        let length = p1.position.distance(p2.position);
        let radius = self.radius_factor * length;
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            p2.angles.x.to_radians(),
            p2.angles.y.to_radians(),
            p2.angles.z.to_radians(),
        );
        BranchDescriptor {
            start: p1.position,
            end: p2.position,
            length,
            radius,
            rotation,
            scale: Vec3::new(radius, length / 2.0, radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turtle::TurtleState;

    fn point_at(y: f32) -> PointRecord {
        TurtleState {
            position: Vec3::new(0.0, y, 0.0),
            ..TurtleState::default()
        }
    }

    #[test]
    fn pair_stepping_counts() {
        let builder = BranchBuilder::default();
        let points: Vec<PointRecord> = (0..8).map(|i| point_at(i as f32)).collect();
        assert_eq!(builder.build(&points[..0]).len(), 0);
        assert_eq!(builder.build(&points[..2]).len(), 0);
        assert_eq!(builder.build(&points[..4]).len(), 1);
        assert_eq!(builder.build(&points[..6]).len(), 2);
        assert_eq!(builder.build(&points[..8]).len(), 3);
    }

    #[test]
    fn descriptor_couples_alternate_points() {
        let builder = BranchBuilder::default();
        let points = vec![point_at(0.0), point_at(1.0), point_at(2.0), point_at(3.0)];
        let branches = builder.build(&points);
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].start, Vec3::ZERO);
        assert_eq!(branches[0].end, Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn radius_and_scale_follow_length() {
        let builder = BranchBuilder::default();
        let points = vec![point_at(0.0), point_at(1.0), point_at(2.0), point_at(3.0)];
        let branch = builder.build(&points)[0];
        assert!((branch.length - 2.0).abs() < 1e-6);
        assert!((branch.radius - 0.2).abs() < 1e-6);
        assert!((branch.scale - Vec3::new(0.2, 1.0, 0.2)).length() < 1e-6);
    }
}
