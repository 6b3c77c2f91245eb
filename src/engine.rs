use crate::horizon::{Horizon, HorizonBuilder, HorizonConfig};
use crate::index::PathIndex;
use crate::localizer;
use crate::path::{GlobalPath, PathPoint};
use crate::pose::Pose;
use log::{debug, info, warn};
use once_cell::sync::OnceCell;
use std::sync::Mutex;
use std::time::Duration;

/// The global path paired with its spatial index, published together.
struct IndexedPath {
    path: GlobalPath,
    index: PathIndex,
}

/// Latest inbound values, overwritten as updates arrive.
#[derive(Clone, Copy, Default)]
struct Inputs {
    pose: Option<Pose>,
    stop_line: Option<usize>,
}

/// The local horizon engine.
///
/// Starts uninitialized and becomes ready when the global path arrives;
/// it then stays ready for the rest of its life. Pose and stop-line
/// updates are plain state refreshes with last-write-wins semantics, and
/// [tick](Self::tick) consumes a snapshot of them taken at tick start.
pub struct Engine {
    config: HorizonConfig,
    builder: HorizonBuilder,
    /// Written exactly once; the cell is the publish barrier that makes
    /// the built index visible to the tick loop.
    path: OnceCell<IndexedPath>,
    inputs: Mutex<Inputs>,
}

impl Engine {
    /// Creates an engine with the given configuration.
    pub fn new(config: HorizonConfig) -> Self {
        Self {
            config,
            builder: HorizonBuilder::new(config),
            path: OnceCell::new(),
            inputs: Mutex::new(Inputs::default()),
        }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &HorizonConfig {
        &self.config
    }

    /// Whether the global path has been delivered and indexed.
    pub fn is_ready(&self) -> bool {
        self.path.get().is_some()
    }

    /// The scheduling interval implied by the configured tick rate.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.config.tick_rate)
    }

    /// Delivers the global path.
    ///
    /// An empty delivery is rejected and the engine stays uninitialized.
    /// After the first accepted delivery the path and its index are
    /// immutable, so redeliveries are ignored; rebuilding would
    /// invalidate the index while a tick is in flight.
    pub fn set_global_path(&self, frame: impl Into<String>, points: Vec<PathPoint>) {
        let path = match GlobalPath::new(frame, points) {
            Ok(path) => path,
            Err(err) => {
                warn!("rejecting global path delivery: {err}");
                return;
            }
        };
        if self.path.get().is_some() {
            debug!("ignoring redelivered global path");
            return;
        }

        let mut index = PathIndex::default();
        index.build(&path);
        let count = path.len();
        if self.path.set(IndexedPath { path, index }).is_ok() {
            info!("global path accepted ({count} points)");
        } else {
            debug!("ignoring redelivered global path");
        }
    }

    /// Stores the latest pose; last write wins.
    pub fn update_pose(&self, pose: Pose) {
        self.inputs.lock().unwrap().pose = Some(pose);
    }

    /// Stores the latest stop-line path index; last write wins.
    ///
    /// Negative values are the "no stop line" sentinel. An index outside
    /// the path is treated the same as the sentinel, never as fatal.
    pub fn set_stop_line(&self, idx: i64) {
        let mut stop_line = usize::try_from(idx).ok();
        if let (Some(stop), Some(indexed)) = (stop_line, self.path.get()) {
            if stop >= indexed.path.len() {
                warn!("stop line index {stop} is outside the path; treating as none");
                stop_line = None;
            }
        }
        self.inputs.lock().unwrap().stop_line = stop_line;
    }

    /// Inbound channel reserved for the obstacle collaborator.
    /// Intentionally a no-op.
    pub fn set_obstacle(&self, _idx: i64) {}

    /// Runs one tick: snapshots the latest inputs, localizes the vehicle
    /// on the path and builds the published window.
    ///
    /// Returns `None` when the pose or the global path is still missing;
    /// the caller skips this publish and waits for the next scheduled
    /// tick.
    pub fn tick(&self) -> Option<Horizon> {
        let indexed = match self.path.get() {
            Some(indexed) => indexed,
            None => {
                debug!("skipping tick: no global path yet");
                return None;
            }
        };

        let (pose, stop_line) = {
            let inputs = self.inputs.lock().unwrap();
            (inputs.pose, inputs.stop_line)
        };
        let pose = match pose {
            Some(pose) => pose,
            None => {
                debug!("skipping tick: no pose yet");
                return None;
            }
        };
        // A stop line delivered before the path could not be range
        // checked at delivery time.
        let stop_line = stop_line.filter(|&idx| {
            let valid = idx < indexed.path.len();
            if !valid {
                warn!("stop line index {idx} is outside the path; treating as none");
            }
            valid
        });

        let start = localizer::resolve(pose.ground_position(), &indexed.index, &indexed.path).ok()?;
        Some(self.builder.select_window(start, &indexed.path, stop_line))
    }
}
