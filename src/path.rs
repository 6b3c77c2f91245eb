use crate::error::EngineError;
use crate::math::{planar, Point2d, Point3d};
use cgmath::MetricSpace;
use itertools::Itertools;

/// A single point of the global path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPoint {
    /// The position in m.
    pub position: Point3d,
    /// The target speed in m/s.
    pub speed: f64,
}

impl PathPoint {
    /// Creates a new path point.
    pub fn new(position: Point3d, speed: f64) -> Self {
        Self { position, speed }
    }

    /// The position projected onto the ground plane.
    pub fn ground_position(&self) -> Point2d {
        planar(self.position)
    }
}

/// The fixed, pre-planned route the vehicle follows.
///
/// Built once from a delivery and never mutated or reordered afterwards;
/// speed rewrites happen on [Horizon](crate::Horizon) copies only.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalPath {
    /// The coordinate frame the path is expressed in.
    frame: String,
    /// The ordered route points.
    points: Vec<PathPoint>,
}

impl GlobalPath {
    /// Creates a path from its coordinate frame tag and route points.
    /// An empty delivery is rejected.
    pub fn new(frame: impl Into<String>, points: Vec<PathPoint>) -> Result<Self, EngineError> {
        if points.is_empty() {
            return Err(EngineError::EmptyPath);
        }
        Ok(Self {
            frame: frame.into(),
            points,
        })
    }

    /// The coordinate frame the path is expressed in.
    pub fn frame(&self) -> &str {
        &self.frame
    }

    /// The number of points on the path. Always at least one.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; construction rejects empty paths.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Gets the point at the given path-order index.
    pub fn point(&self, idx: usize) -> &PathPoint {
        &self.points[idx]
    }

    /// All points in path order.
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// The target speed of the point at `idx` in m/s.
    pub fn speed_at(&self, idx: usize) -> f64 {
        self.points[idx].speed
    }

    /// Arc length in m along the path from index `from` to index `to`,
    /// summing consecutive point-to-point distances.
    /// Zero when `to <= from`.
    pub fn distance_between(&self, from: usize, to: usize) -> f64 {
        arc_length(&self.points, from, to)
    }
}

/// Sum of consecutive point-to-point distances from index `from` to
/// index `to` within a slice of path points. Zero when `to <= from`.
pub(crate) fn arc_length(points: &[PathPoint], from: usize, to: usize) -> f64 {
    if to <= from {
        return 0.0;
    }
    points[from..=to]
        .iter()
        .tuple_windows()
        .map(|(a, b)| a.position.distance(b.position))
        .sum()
}
