use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReacherError, Result};

pub const FRAME_SKIP: usize = 1;
pub const SUCCESS_THRESHOLD: f64 = 0.03;
pub const SUCCESS_DELAY_STEPS: u32 = 20;
pub const SUCCESS_BONUS: f64 = 10.0;
pub const TARGET_INNER_RADIUS: f64 = 0.02;
pub const TARGET_OUTER_RADIUS: f64 = 0.06;
pub const TARGET_HEIGHT: f64 = 0.1;
pub const INIT_QPOS_RANGE: f64 = 1.0;
pub const VELOCITY_PENALTY: f64 = 0.005;
pub const ACTION_PENALTY: f64 = 0.002;
pub const TIME_PENALTY: f64 = 0.01;

/// Reacher 任务参数，默认值即固定常量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReacherConfig {
    /// 每次 step 的物理积分子步数
    pub frame_skip: usize,
    /// 指尖与目标的成功距离
    pub success_threshold: f64,
    /// 成功后冻结的保持步数
    pub success_delay_steps: u32,
    pub success_bonus: f64,
    pub target_inner_radius: f64,
    pub target_outer_radius: f64,
    /// 目标点固定的 z 坐标
    pub target_height: f64,
    /// 初始关节角在 [-range, range] 内均匀采样
    pub init_qpos_range: f64,
    pub velocity_penalty: f64,
    pub action_penalty: f64,
    pub time_penalty: f64,
}

impl Default for ReacherConfig {
    fn default() -> Self {
        Self {
            frame_skip: FRAME_SKIP,
            success_threshold: SUCCESS_THRESHOLD,
            success_delay_steps: SUCCESS_DELAY_STEPS,
            success_bonus: SUCCESS_BONUS,
            target_inner_radius: TARGET_INNER_RADIUS,
            target_outer_radius: TARGET_OUTER_RADIUS,
            target_height: TARGET_HEIGHT,
            init_qpos_range: INIT_QPOS_RANGE,
            velocity_penalty: VELOCITY_PENALTY,
            action_penalty: ACTION_PENALTY,
            time_penalty: TIME_PENALTY,
        }
    }
}

impl ReacherConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_skip == 0 {
            return Err(invalid("frame_skip must be at least 1"));
        }
        let floats = [
            ("success_threshold", self.success_threshold),
            ("success_bonus", self.success_bonus),
            ("target_inner_radius", self.target_inner_radius),
            ("target_outer_radius", self.target_outer_radius),
            ("target_height", self.target_height),
            ("init_qpos_range", self.init_qpos_range),
            ("velocity_penalty", self.velocity_penalty),
            ("action_penalty", self.action_penalty),
            ("time_penalty", self.time_penalty),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(&format!("{name} must be finite")));
        }
        if self.target_inner_radius < 0.0 || self.target_outer_radius <= self.target_inner_radius
        {
            return Err(invalid(
                "target radii must satisfy 0 <= inner < outer",
            ));
        }
        if self.success_threshold < 0.0 || self.init_qpos_range < 0.0 {
            return Err(invalid(
                "success_threshold and init_qpos_range must be non-negative",
            ));
        }
        if self.velocity_penalty < 0.0 || self.action_penalty < 0.0 || self.time_penalty < 0.0 {
            return Err(invalid("penalty weights must be non-negative"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> ReacherError {
    ReacherError::Config(msg.to_string())
}
