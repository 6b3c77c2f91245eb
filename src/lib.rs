pub use cgmath;
pub use engine::Engine;
pub use error::EngineError;
pub use horizon::{Horizon, HorizonBuilder, HorizonConfig};
pub use index::PathIndex;
pub use localizer::resolve;
pub use path::{GlobalPath, PathPoint};
pub use pose::Pose;

mod engine;
mod error;
mod horizon;
mod index;
mod localizer;
pub mod math;
mod path;
mod pose;
