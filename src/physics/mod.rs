//! Narrow interface to the physics engine driving the arm.
//!
//! The episode logic never integrates dynamics itself; it only writes state,
//! advances time and reads site positions through [`PhysicsBackend`].

pub mod planar_arm;

pub use planar_arm::{PlanarArm, PlanarArmParams};

use crate::error::PhysicsError;

pub const FINGERTIP_SITE: &str = "fingertip_site";
pub const TARGET_SITE: &str = "target";

pub trait PhysicsBackend {
    /// Instantaneously overwrite joint positions and velocities.
    fn set_state(&mut self, qpos: &[f64], qvel: &[f64]) -> Result<(), PhysicsError>;

    /// Integrate `n_substeps` times, applying `action` as control on each one.
    fn advance(&mut self, action: &[f64], n_substeps: usize) -> Result<(), PhysicsError>;

    /// Current world-space position of a named site.
    fn site_world_position(&self, name: &str) -> Result<[f64; 3], PhysicsError>;

    fn set_site_position(&mut self, name: &str, pos: [f64; 3]) -> Result<(), PhysicsError>;

    fn joint_positions(&self) -> &[f64];

    fn joint_velocities(&self) -> &[f64];

    /// Number of velocity degrees of freedom (`nv`).
    fn dof(&self) -> usize {
        self.joint_velocities().len()
    }

    /// Number of actuators (`nu`).
    fn actuator_count(&self) -> usize;
}
