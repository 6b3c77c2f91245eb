use crate::error::EngineError;
use crate::index::PathIndex;
use crate::math::{Point2d, Vector2d};
use crate::path::GlobalPath;
use cgmath::InnerSpace;

/// Resolves the path index the vehicle currently occupies.
///
/// The nearest point may lie slightly behind the vehicle along the
/// direction of travel. The vehicle's offset from that point is projected
/// onto the local path tangent; a positive projection means the point is
/// behind, so the localization advances one index (wrapping at the path
/// end). This is a sign test only, not an arc-length projection.
pub fn resolve(
    position: Point2d,
    index: &PathIndex,
    path: &GlobalPath,
) -> Result<usize, EngineError> {
    let closest = index.nearest_index(position)?;
    let prev = if closest == 0 { path.len() - 1 } else { closest - 1 };

    let closest_pt = path.point(closest).ground_position();
    let prev_pt = path.point(prev).ground_position();

    // On a single-point path the tangent is zero and the test is skipped.
    let tangent: Vector2d = closest_pt - prev_pt;
    let offset: Vector2d = position - closest_pt;

    if tangent.dot(offset) > 0.0 {
        Ok((closest + 1) % path.len())
    } else {
        Ok(closest)
    }
}
