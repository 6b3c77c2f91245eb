use crate::math::{planar, Point2d, Point3d};

/// The vehicle's live pose, delivered by the localization stack.
///
/// Only the position is consumed by this engine; the heading is carried
/// for completeness of the inbound message.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    /// The position in m.
    pub position: Point3d,
    /// The heading in rad, anticlockwise from the positive x-axis.
    pub heading: f64,
}

impl Pose {
    /// Creates a new pose.
    pub fn new(position: Point3d, heading: f64) -> Self {
        Self { position, heading }
    }

    /// The position projected onto the ground plane.
    pub fn ground_position(&self) -> Point2d {
        planar(self.position)
    }
}
