// detailed implementation
pub mod environments;
pub mod observation;
pub mod physics;
pub mod utils;
pub mod wrappers;

pub mod config;
pub mod error;

// Traits
pub mod environment;
pub mod policy;

pub use config::ReacherConfig;
pub use environment::{Environment, StepResult};
pub use environments::reacher::{EpisodeState, Phase, Reacher, RewardComponents, StepInfo};
pub use error::{PhysicsError, ReacherError};
pub use observation::Observation;
pub use physics::{PhysicsBackend, PlanarArm};
