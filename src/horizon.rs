use crate::path::{arc_length, GlobalPath, PathPoint};

/// Tunable parameters of the horizon engine.
#[derive(Clone, Copy, Debug)]
pub struct HorizonConfig {
    /// Number of path points published in each horizon.
    pub lookahead: usize,
    /// The publish rate in Hz.
    pub tick_rate: f64,
    /// The maximum comfortable deceleration in m/s^2.
    pub max_decel: f64,
    /// How many points before the stop line the vehicle is commanded to
    /// rest, so its nose rather than its centre halts at the line.
    pub stop_buffer: usize,
    /// Commanded speeds at or below this threshold snap to zero, in m/s.
    pub min_velocity: f64,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            lookahead: 200,
            tick_rate: 50.0, // Hz
            max_decel: 0.5,  // m/s^2
            stop_buffer: 2,
            min_velocity: 1.0, // m/s
        }
    }
}

/// The per-tick output: a bounded, forward-looking slice of the global
/// path whose speeds may have been rewritten by the braking profile.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Horizon {
    /// The coordinate frame, carried over from the global path.
    pub frame: String,
    /// The path-order index of the first window point.
    pub start_index: usize,
    /// The window points, in path order.
    pub points: Vec<PathPoint>,
}

/// Builds the published window from a localized path index.
#[derive(Clone, Debug)]
pub struct HorizonBuilder {
    config: HorizonConfig,
}

impl HorizonBuilder {
    /// Creates a builder with the given configuration.
    pub fn new(config: HorizonConfig) -> Self {
        Self { config }
    }

    /// Per-tick entry point: extracts the look-ahead window and applies
    /// the braking profile when a stop line falls inside it.
    pub fn select_window(
        &self,
        start: usize,
        path: &GlobalPath,
        stop_line: Option<usize>,
    ) -> Horizon {
        let mut points = self.build_window(start, path);
        if let Some(stop_line) = stop_line {
            if stop_line < start + self.config.lookahead {
                self.decelerate(&mut points, start, stop_line);
            }
        }
        Horizon {
            frame: path.frame().to_owned(),
            start_index: start,
            points,
        }
    }

    /// Copies up to `lookahead` points starting at `start`. The window is
    /// truncated at the path end; it never wraps around.
    pub fn build_window(&self, start: usize, path: &GlobalPath) -> Vec<PathPoint> {
        let end = usize::min(start + self.config.lookahead, path.len());
        path.points()[start..end].to_vec()
    }

    /// Rewrites window speeds so the vehicle comes to rest `stop_buffer`
    /// points before the stop line.
    ///
    /// Each point gets the constant-deceleration speed `sqrt(2 a d)` for
    /// its remaining arc length `d` to the stop point, capped at the
    /// point's nominal target speed. Speeds at or below the snap
    /// threshold become exactly zero, so the vehicle stops rather than
    /// creeping asymptotically toward the line.
    pub fn decelerate(&self, window: &mut [PathPoint], start: usize, stop_line: usize) {
        let stop_offset = stop_line
            .saturating_sub(start)
            .saturating_sub(self.config.stop_buffer);
        // Clamped so callers outside the tick path cannot index past a
        // truncated window.
        let stop_offset = usize::min(stop_offset, window.len().saturating_sub(1));

        for i in 0..window.len() {
            let dist = arc_length(window, i, stop_offset);
            let vel = (2.0 * self.config.max_decel * dist).sqrt();
            let vel = if vel <= self.config.min_velocity {
                0.0
            } else {
                vel
            };
            window[i].speed = f64::min(vel, window[i].speed);
        }
    }
}
