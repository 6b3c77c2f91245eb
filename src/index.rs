use crate::error::EngineError;
use crate::math::Point2d;
use crate::path::GlobalPath;
use cgmath::MetricSpace;

/// Spatial index over the ground-plane projections of a global path.
///
/// A balanced k-d tree built once when the path arrives, giving
/// O(log K) nearest-point queries for a path of K points. Rebuilding is
/// deliberately disallowed: once built, further [build](Self::build)
/// calls are no-ops so the index can never be invalidated mid-tick.
#[derive(Clone, Debug, Default)]
pub struct PathIndex {
    nodes: Vec<Node>,
    root: Option<usize>,
}

#[derive(Clone, Debug)]
struct Node {
    point: Point2d,
    /// Path-order index of the point.
    path_idx: usize,
    left: Option<usize>,
    right: Option<usize>,
}

impl PathIndex {
    /// Builds the index over the (x, y) projections of the path points.
    /// A no-op if the index is already built.
    pub fn build(&mut self, path: &GlobalPath) {
        if self.root.is_some() {
            return;
        }
        let mut entries = path
            .points()
            .iter()
            .enumerate()
            .map(|(idx, point)| (point.ground_position(), idx))
            .collect::<Vec<_>>();
        self.nodes.reserve_exact(entries.len());
        self.root = self.build_subtree(&mut entries, 0);
    }

    /// Whether the index has been built.
    pub fn is_built(&self) -> bool {
        self.root.is_some()
    }

    /// The path-order index of the point closest to `query` by Euclidean
    /// distance in the ground plane. Ties resolve to the lowest path
    /// index. Fails with [EngineError::NotReady] before the first build.
    pub fn nearest_index(&self, query: Point2d) -> Result<usize, EngineError> {
        let root = self.root.ok_or(EngineError::NotReady)?;
        let mut best = (f64::INFINITY, usize::MAX);
        self.search(root, query, 0, &mut best);
        Ok(best.1)
    }

    /// Recursively builds a balanced subtree by median split, cycling the
    /// split axis per level. Sorting is keyed on (coordinate, path index)
    /// so the layout is deterministic for equal coordinates.
    fn build_subtree(&mut self, entries: &mut [(Point2d, usize)], axis: usize) -> Option<usize> {
        if entries.is_empty() {
            return None;
        }
        entries.sort_unstable_by(|a, b| {
            let ka = coord(a.0, axis);
            let kb = coord(b.0, axis);
            ka.total_cmp(&kb).then(a.1.cmp(&b.1))
        });

        let mid = entries.len() / 2;
        let (point, path_idx) = entries[mid];
        let node_idx = self.nodes.len();
        self.nodes.push(Node {
            point,
            path_idx,
            left: None,
            right: None,
        });

        let (lower, upper) = entries.split_at_mut(mid);
        let left = self.build_subtree(lower, 1 - axis);
        let right = self.build_subtree(&mut upper[1..], 1 - axis);
        self.nodes[node_idx].left = left;
        self.nodes[node_idx].right = right;
        Some(node_idx)
    }

    fn search(&self, node_idx: usize, query: Point2d, axis: usize, best: &mut (f64, usize)) {
        let node = &self.nodes[node_idx];
        let dist2 = query.distance2(node.point);
        if dist2 < best.0 || (dist2 == best.0 && node.path_idx < best.1) {
            *best = (dist2, node.path_idx);
        }

        let delta = coord(query, axis) - coord(node.point, axis);
        let (near, far) = if delta < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        if let Some(near) = near {
            self.search(near, query, 1 - axis, best);
        }
        // The far side can only win if the splitting plane is within the
        // current best radius; <= keeps exact ties reachable.
        if let Some(far) = far {
            if delta * delta <= best.0 {
                self.search(far, query, 1 - axis, best);
            }
        }
    }
}

fn coord(point: Point2d, axis: usize) -> f64 {
    if axis == 0 {
        point.x
    } else {
        point.y
    }
}
