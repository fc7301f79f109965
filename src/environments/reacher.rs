use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::ReacherConfig;
use crate::environment::{Environment, StepResult};
use crate::error::{PhysicsError, ReacherError, Result};
use crate::observation::{OBS_DIM, Observation, norm};
use crate::physics::{FINGERTIP_SITE, PhysicsBackend, TARGET_SITE};

/// 成功后的保持状态机
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// 正常推进物理并计算奖励
    #[default]
    Active,
    /// 物理冻结，倒计时结束时发出一次 terminated
    Holding { remaining: u32 },
}

/// 单个 episode 的瞬态状态，reset 时整体清空
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EpisodeState {
    /// 上一个有效步的指尖-目标距离，reset 之前为 None
    pub previous_distance: Option<f64>,
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardComponents {
    pub distance_reward: f64,
    pub velocity_penalty: f64,
    pub action_penalty: f64,
    pub time_penalty: f64,
    pub success_bonus: f64,
}

impl RewardComponents {
    pub fn total(&self) -> f64 {
        self.distance_reward - self.velocity_penalty - self.action_penalty - self.time_penalty
            + self.success_bonus
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    pub distance: f64,
    pub success: bool,
    /// 仅在保持期内或刚触发成功时为 Some(true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reward: Option<RewardComponents>,
}

pub type ReacherStep = StepResult<Observation, f64, StepInfo>;

/// 两连杆 Reacher 任务：指尖到达随机目标并保持
pub struct Reacher<B: PhysicsBackend> {
    backend: B,
    config: ReacherConfig,
    rng: ChaCha8Rng,
    episode: EpisodeState,
}

impl<B: PhysicsBackend> Reacher<B> {
    pub fn new(backend: B, config: ReacherConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(backend, config, seed))
    }

    /// 默认配置总是合法，无需校验
    pub fn with_default_config(backend: B, seed: u64) -> Self {
        Self::from_validated(backend, ReacherConfig::default(), seed)
    }

    fn from_validated(backend: B, config: ReacherConfig, seed: u64) -> Self {
        Self {
            backend,
            config,
            rng: ChaCha8Rng::seed_from_u64(seed),
            episode: EpisodeState::default(),
        }
    }

    /// 重新设定随机源，不影响物理时间步长
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub fn reset_with_seed(&mut self, seed: u64) -> Result<Observation> {
        self.seed(seed);
        self.reset()
    }

    pub fn reset(&mut self) -> Result<Observation> {
        let range = self.config.init_qpos_range;
        let qpos = [
            self.rng.random_range(-range..=range),
            self.rng.random_range(-range..=range),
        ];
        let qvel = vec![0.0; self.backend.dof()];
        self.backend.set_state(&qpos, &qvel)?;

        let target = self.sample_target();
        self.backend.set_site_position(TARGET_SITE, target)?;

        // 用零动作推进一步，刷新 site 的世界坐标
        let zeros = vec![0.0; self.backend.actuator_count()];
        self.backend.advance(&zeros, 1)?;

        let obs = self.observe()?;
        let distance = obs.distance();
        self.episode = EpisodeState {
            previous_distance: Some(distance),
            phase: Phase::Active,
        };
        debug!(?qpos, ?target, distance, "episode reset");
        Ok(obs)
    }

    pub fn step(&mut self, action: &[f64]) -> Result<ReacherStep> {
        if let Phase::Holding { remaining } = self.episode.phase {
            return self.hold_step(remaining);
        }

        self.backend.advance(action, self.config.frame_skip)?;
        let obs = self.observe()?;
        let distance = obs.distance();

        let previous = self.episode.previous_distance.unwrap_or_else(|| {
            debug!("step before reset, no previous distance");
            distance
        });
        let success = distance < self.config.success_threshold;
        let components = RewardComponents {
            distance_reward: previous - distance,
            velocity_penalty: self.config.velocity_penalty * norm(&obs.joint_velocities),
            action_penalty: self.config.action_penalty * norm(action),
            time_penalty: self.config.time_penalty,
            success_bonus: if success { self.config.success_bonus } else { 0.0 },
        };
        let reward = components.total();
        trace!(?components, reward, distance, "active step");

        let mut info = StepInfo {
            distance,
            success,
            delay: None,
            reward: Some(components),
        };
        if success {
            let hold = self.config.success_delay_steps;
            // 保持步数为 0 时不进入保持期，也不会终止
            if hold > 0 {
                self.episode.phase = Phase::Holding { remaining: hold };
            }
            info.delay = Some(true);
            debug!(distance, hold, "target reached, holding");
        }
        self.episode.previous_distance = Some(distance);

        Ok(StepResult {
            next_state: obs,
            reward,
            terminated: false,
            truncated: false,
            info,
        })
    }

    fn hold_step(&mut self, remaining: u32) -> Result<ReacherStep> {
        let remaining = remaining.saturating_sub(1);
        let obs = self.observe()?;
        let distance = obs.distance();
        let terminated = remaining == 0;
        self.episode.phase = if terminated {
            debug!(distance, "hold window finished, terminating");
            Phase::Active
        } else {
            Phase::Holding { remaining }
        };
        Ok(StepResult {
            next_state: obs,
            reward: 0.0,
            terminated,
            truncated: false,
            info: StepInfo {
                distance,
                success: distance < self.config.success_threshold,
                delay: Some(true),
                reward: None,
            },
        })
    }

    /// 从物理后端读取当前观测
    pub fn observe(&self) -> Result<Observation> {
        Ok(Observation {
            joint_positions: first_two("joint positions", self.backend.joint_positions())?,
            joint_velocities: first_two("joint velocities", self.backend.joint_velocities())?,
            fingertip: self.backend.site_world_position(FINGERTIP_SITE)?,
            target: self.backend.site_world_position(TARGET_SITE)?,
        })
    }

    /// 在圆环内按面积均匀采样：r² 均匀而非 r 均匀
    fn sample_target(&mut self) -> [f64; 3] {
        let inner = self.config.target_inner_radius;
        let outer = self.config.target_outer_radius;
        let r = self.rng.random_range(inner * inner..=outer * outer).sqrt();
        let theta = self.rng.random_range(0.0..std::f64::consts::TAU);
        [r * theta.cos(), r * theta.sin(), self.config.target_height]
    }

    pub fn target(&self) -> Result<[f64; 3]> {
        Ok(self.backend.site_world_position(TARGET_SITE)?)
    }

    pub fn episode(&self) -> &EpisodeState {
        &self.episode
    }

    pub fn previous_distance(&self) -> Option<f64> {
        self.episode.previous_distance
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.episode.phase, Phase::Holding { .. })
    }

    pub fn config(&self) -> &ReacherConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn action_bounds(&self) -> (f64, f64) {
        (-1.0, 1.0)
    }
}

fn first_two(what: &'static str, values: &[f64]) -> std::result::Result<[f64; 2], PhysicsError> {
    match values {
        [a, b, ..] => Ok([*a, *b]),
        _ => Err(PhysicsError::DimensionMismatch {
            what,
            expected: 2,
            got: values.len(),
        }),
    }
}

impl<B: PhysicsBackend> Environment for Reacher<B> {
    type State = Observation;
    type Action = [f64];
    type Reward = f64;
    type Info = StepInfo;
    type Error = ReacherError;

    fn reset(&mut self) -> Result<Self::State> {
        Reacher::reset(self)
    }

    fn step(&mut self, action: &Self::Action) -> Result<ReacherStep> {
        Reacher::step(self, action)
    }

    fn current_state(&self) -> Result<Self::State> {
        self.observe()
    }

    fn action_space(&self) -> usize {
        self.backend.actuator_count()
    }

    fn state_dim(&self) -> usize {
        OBS_DIM
    }
}
