#[derive(Debug, Clone, PartialEq)]
pub struct StepResult<S, R, I> {
    pub next_state: S,
    pub reward: R,
    /// 任务本身结束(成功保持期结束)
    pub terminated: bool,
    /// 由外部时间限制截断
    pub truncated: bool,
    pub info: I,
}

impl<S, R, I> StepResult<S, R, I> {
    pub fn done(&self) -> bool {
        self.terminated || self.truncated
    }
}

pub trait Environment {
    type State;
    type Action: ?Sized;
    type Reward: Copy + Into<f64>;
    type Info;
    type Error: std::error::Error;

    fn reset(&mut self) -> Result<Self::State, Self::Error>;

    #[allow(clippy::type_complexity)]
    fn step(
        &mut self,
        action: &Self::Action,
    ) -> Result<StepResult<Self::State, Self::Reward, Self::Info>, Self::Error>; // (next_state, reward, terminated, truncated, info)

    /// 获取当前状态
    fn current_state(&self) -> Result<Self::State, Self::Error>;

    /// 动作空间维度
    fn action_space(&self) -> usize;

    /// 状态空间维度
    fn state_dim(&self) -> usize;
}
