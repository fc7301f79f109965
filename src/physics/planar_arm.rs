use crate::error::PhysicsError;
use crate::physics::{FINGERTIP_SITE, PhysicsBackend, TARGET_SITE};

/// 简化版两连杆平面机械臂，独立关节 + 阻尼，半隐式欧拉积分
#[derive(Debug, Clone, PartialEq)]
pub struct PlanarArmParams {
    pub timestep: f64,
    pub link_lengths: [f64; 2],
    /// 指尖所在平面的高度
    pub fingertip_height: f64,
    pub gear: f64,
    pub damping: f64,
    pub inertia: f64,
    /// 控制输入被截断到 [-ctrl_limit, ctrl_limit]
    pub ctrl_limit: f64,
}

impl Default for PlanarArmParams {
    fn default() -> Self {
        Self {
            timestep: 0.01,
            link_lengths: [0.1, 0.11],
            fingertip_height: 0.1,
            gear: 1.0,
            damping: 1.0,
            inertia: 0.05,
            ctrl_limit: 1.0,
        }
    }
}

pub struct PlanarArm {
    pub params: PlanarArmParams,
    qpos: [f64; 2],
    qvel: [f64; 2],
    target_pos: [f64; 3],
    // 与 MuJoCo 的 site_xpos 一样，只在积分之后刷新
    fingertip_xpos: [f64; 3],
}

impl PlanarArm {
    pub fn new(params: PlanarArmParams) -> Self {
        let mut arm = Self {
            params,
            qpos: [0.0; 2],
            qvel: [0.0; 2],
            target_pos: [0.0; 3],
            fingertip_xpos: [0.0; 3],
        };
        arm.forward();
        arm
    }

    /// 正运动学
    pub fn fingertip_for(&self, qpos: &[f64; 2]) -> [f64; 3] {
        let [l0, l1] = self.params.link_lengths;
        let a0 = qpos[0];
        let a1 = qpos[0] + qpos[1];
        [
            l0 * a0.cos() + l1 * a1.cos(),
            l0 * a0.sin() + l1 * a1.sin(),
            self.params.fingertip_height,
        ]
    }

    fn forward(&mut self) {
        self.fingertip_xpos = self.fingertip_for(&self.qpos);
    }

    fn integrate(&mut self, action: &[f64]) {
        let p = &self.params;
        for i in 0..2 {
            let ctrl = action[i].clamp(-p.ctrl_limit, p.ctrl_limit);
            let qacc = (p.gear * ctrl - p.damping * self.qvel[i]) / p.inertia;
            self.qvel[i] += p.timestep * qacc;
            self.qpos[i] += p.timestep * self.qvel[i];
        }
    }
}

impl Default for PlanarArm {
    fn default() -> Self {
        Self::new(PlanarArmParams::default())
    }
}

fn check_len(what: &'static str, values: &[f64], expected: usize) -> Result<(), PhysicsError> {
    if values.len() != expected {
        return Err(PhysicsError::DimensionMismatch {
            what,
            expected,
            got: values.len(),
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(PhysicsError::NonFinite(what));
    }
    Ok(())
}

impl PhysicsBackend for PlanarArm {
    fn set_state(&mut self, qpos: &[f64], qvel: &[f64]) -> Result<(), PhysicsError> {
        check_len("qpos", qpos, 2)?;
        check_len("qvel", qvel, 2)?;
        self.qpos.copy_from_slice(qpos);
        self.qvel.copy_from_slice(qvel);
        Ok(())
    }

    fn advance(&mut self, action: &[f64], n_substeps: usize) -> Result<(), PhysicsError> {
        check_len("action", action, self.actuator_count())?;
        for _ in 0..n_substeps {
            self.integrate(action);
        }
        self.forward();
        Ok(())
    }

    fn site_world_position(&self, name: &str) -> Result<[f64; 3], PhysicsError> {
        match name {
            FINGERTIP_SITE => Ok(self.fingertip_xpos),
            TARGET_SITE => Ok(self.target_pos),
            _ => Err(PhysicsError::UnknownSite(name.to_string())),
        }
    }

    fn set_site_position(&mut self, name: &str, pos: [f64; 3]) -> Result<(), PhysicsError> {
        match name {
            TARGET_SITE => {
                check_len("site position", &pos, 3)?;
                self.target_pos = pos;
                Ok(())
            }
            // 指尖挂在连杆上，不能直接移动
            _ => Err(PhysicsError::UnknownSite(name.to_string())),
        }
    }

    fn joint_positions(&self) -> &[f64] {
        &self.qpos
    }

    fn joint_velocities(&self) -> &[f64] {
        &self.qvel
    }

    fn actuator_count(&self) -> usize {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_positions_refresh_only_after_advance() {
        let mut arm = PlanarArm::default();
        let rest = arm.site_world_position(FINGERTIP_SITE).unwrap();
        assert!((rest[0] - 0.21).abs() < 1e-12);

        arm.set_state(&[std::f64::consts::FRAC_PI_2, 0.0], &[0.0, 0.0])
            .unwrap();
        assert_eq!(arm.site_world_position(FINGERTIP_SITE).unwrap(), rest);

        arm.advance(&[0.0, 0.0], 1).unwrap();
        let moved = arm.site_world_position(FINGERTIP_SITE).unwrap();
        assert!(moved[0].abs() < 1e-9);
        assert!((moved[1] - 0.21).abs() < 1e-9);
    }

    #[test]
    fn torque_accelerates_joints() {
        let mut arm = PlanarArm::default();
        arm.advance(&[1.0, -1.0], 5).unwrap();
        assert!(arm.joint_velocities()[0] > 0.0);
        assert!(arm.joint_velocities()[1] < 0.0);
        assert!(arm.joint_positions()[0] > 0.0);
    }

    #[test]
    fn velocity_builds_up_over_substeps() {
        let mut one = PlanarArm::default();
        let mut three = PlanarArm::default();
        one.advance(&[1.0, 1.0], 1).unwrap();
        three.advance(&[1.0, 1.0], 3).unwrap();

        // dv = dt * (gear * u - damping * v) / inertia
        assert!((one.joint_velocities()[0] - 0.2).abs() < 1e-12);
        let v3 = three.joint_velocities()[0];
        assert!((v3 - 0.488).abs() < 1e-12, "three substeps gave {v3}");
        assert!(v3 < 1.0);
    }

    #[test]
    fn rejects_wrong_action_dimension() {
        let mut arm = PlanarArm::default();
        let err = arm.advance(&[0.0], 1).unwrap_err();
        assert_eq!(
            err,
            PhysicsError::DimensionMismatch {
                what: "action",
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn rejects_non_finite_action() {
        let mut arm = PlanarArm::default();
        assert_eq!(
            arm.advance(&[f64::NAN, 0.0], 1).unwrap_err(),
            PhysicsError::NonFinite("action")
        );
    }

    #[test]
    fn target_site_is_writable_fingertip_is_not() {
        let mut arm = PlanarArm::default();
        arm.set_site_position(TARGET_SITE, [0.01, 0.02, 0.1]).unwrap();
        assert_eq!(arm.site_world_position(TARGET_SITE).unwrap(), [0.01, 0.02, 0.1]);
        assert!(arm.set_site_position(FINGERTIP_SITE, [0.0; 3]).is_err());
        assert!(arm.site_world_position("elbow").is_err());
    }
}
