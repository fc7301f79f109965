use tracing::info;

use crate::environment::{Environment, StepResult};

/// Gymnasium 注册 Reacher 时使用的回合长度
pub const DEFAULT_MAX_EPISODE_STEPS: usize = 50;

/// 超过步数上限时把 truncated 置为 true，任务本身从不截断
pub struct TimeLimit<E> {
    env: E,
    max_episode_steps: usize,
    elapsed: usize,
}

impl<E: Environment> TimeLimit<E> {
    pub fn new(env: E, max_episode_steps: usize) -> Self {
        Self {
            env,
            max_episode_steps,
            elapsed: 0,
        }
    }

    pub fn elapsed_steps(&self) -> usize {
        self.elapsed
    }

    pub fn inner(&self) -> &E {
        &self.env
    }

    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn into_inner(self) -> E {
        self.env
    }
}

impl<E: Environment> Environment for TimeLimit<E> {
    type State = E::State;
    type Action = E::Action;
    type Reward = E::Reward;
    type Info = E::Info;
    type Error = E::Error;

    fn reset(&mut self) -> Result<Self::State, Self::Error> {
        self.elapsed = 0;
        self.env.reset()
    }

    fn step(
        &mut self,
        action: &Self::Action,
    ) -> Result<StepResult<Self::State, Self::Reward, Self::Info>, Self::Error> {
        let mut result = self.env.step(action)?;
        self.elapsed += 1;
        if self.elapsed >= self.max_episode_steps {
            info!(steps = self.elapsed, "episode truncated by time limit");
            result.truncated = true;
        }
        Ok(result)
    }

    fn current_state(&self) -> Result<Self::State, Self::Error> {
        self.env.current_state()
    }

    fn action_space(&self) -> usize {
        self.env.action_space()
    }

    fn state_dim(&self) -> usize {
        self.env.state_dim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environments::reacher::Reacher;
    use crate::physics::PlanarArm;

    #[test]
    fn truncates_at_step_limit_and_resets_counter() {
        let env = Reacher::with_default_config(PlanarArm::default(), 0);
        let mut env = TimeLimit::new(env, 3);
        env.reset().unwrap();
        // 零动作下指尖不动，不会触发成功
        let truncated: Vec<bool> = (0..3)
            .map(|_| env.step(&[0.0, 0.0]).unwrap().truncated)
            .collect();
        assert_eq!(truncated, vec![false, false, true]);

        env.reset().unwrap();
        assert_eq!(env.elapsed_steps(), 0);
        assert!(!env.step(&[0.0, 0.0]).unwrap().truncated);
    }
}
