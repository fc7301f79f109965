use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub trait Policy<S, A> {
    // 根据状态选择动作
    fn select_action(&mut self, state: &S) -> A;
}

/// 始终输出零力矩
#[derive(Debug, Clone)]
pub struct ZeroPolicy {
    pub action_dim: usize,
}

impl ZeroPolicy {
    pub fn new(action_dim: usize) -> Self {
        Self { action_dim }
    }
}

impl<S> Policy<S, Vec<f64>> for ZeroPolicy {
    fn select_action(&mut self, _state: &S) -> Vec<f64> {
        vec![0.0; self.action_dim]
    }
}

/// 在 [low, high) 内独立均匀采样每个分量，要求 low < high
#[derive(Debug, Clone)]
pub struct UniformPolicy {
    pub action_dim: usize,
    pub low: f64,
    pub high: f64,
    rng: ChaCha8Rng,
}

impl UniformPolicy {
    pub fn new(action_dim: usize, (low, high): (f64, f64), seed: u64) -> Self {
        Self {
            action_dim,
            low,
            high,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<S> Policy<S, Vec<f64>> for UniformPolicy {
    fn select_action(&mut self, _state: &S) -> Vec<f64> {
        (0..self.action_dim)
            .map(|_| self.rng.random_range(self.low..self.high))
            .collect()
    }
}
