use thiserror::Error;

/// Failure modes of the horizon engine.
///
/// None of these are fatal: the correct response to a missing input is to
/// skip the current tick's publish and retry on the next scheduled tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Localization or window building was requested before the global
    /// path was delivered and indexed.
    #[error("global path not yet delivered")]
    NotReady,
    /// A global path delivery contained no points.
    #[error("global path contains no points")]
    EmptyPath,
}
