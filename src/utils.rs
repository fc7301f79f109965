use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::environments::reacher::StepInfo;
use crate::policy::Policy;

#[cfg(feature = "tch")]
use tch::Tensor;

#[cfg(feature = "tch")]
pub trait ToTensor {
    fn to_tensor(&self) -> Tensor;
}

#[cfg(feature = "tch")]
impl ToTensor for crate::observation::Observation {
    fn to_tensor(&self) -> Tensor {
        let values = self.to_array().map(|v| v as f32);
        Tensor::from_slice(&values).unsqueeze(0)
    }
}

/// 单个 episode 的统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeStats {
    pub steps: usize,
    pub total_return: f64,
    /// 报告 success 的步数(含保持期)
    pub successes: usize,
    pub terminated: bool,
    pub truncated: bool,
}

/// 重置环境并按策略执行，直到结束或达到 max_steps
pub fn rollout<E, P>(env: &mut E, policy: &mut P, max_steps: usize) -> Result<EpisodeStats, E::Error>
where
    E: Environment<Action = [f64], Info = StepInfo>,
    P: Policy<E::State, Vec<f64>>,
{
    let mut state = env.reset()?;
    let mut stats = EpisodeStats::default();
    while stats.steps < max_steps {
        let action = policy.select_action(&state);
        let result = env.step(action.as_slice())?;
        let reward: f64 = result.reward.into();
        stats.steps += 1;
        stats.total_return += reward;
        if result.info.success {
            stats.successes += 1;
        }
        stats.terminated = result.terminated;
        stats.truncated = result.truncated;
        if result.done() {
            break;
        }
        state = result.next_state;
    }
    Ok(stats)
}

#[cfg(feature = "plot")]
pub fn plot_returns(
    returns: &[f64],
    filename: &str,
    title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    use plotters::prelude::*;

    let root = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    // 回报可能为负，上下界都要留余量
    let max_return = returns.iter().cloned().fold(f64::MIN, f64::max).max(1.0);
    let min_return = returns.iter().cloned().fold(f64::MAX, f64::min).min(0.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("Times New Roman", 32).into_font())
        .margin(30)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0..returns.len().max(1), min_return..max_return)?;

    chart
        .configure_mesh()
        .x_desc("Episode")
        .y_desc("Total Return")
        .axis_desc_style(("Times New Roman", 22))
        .label_style(("Times New Roman", 18))
        .light_line_style(WHITE.mix(0.3))
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            returns.iter().enumerate().map(|(i, r)| (i, *r)),
            &BLUE,
        ))?
        .label("Return")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("Times New Roman", 18))
        .draw()?;

    root.present()?;
    tracing::info!(filename, "saved return plot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environments::reacher::Reacher;
    use crate::physics::PlanarArm;
    use crate::policy::{UniformPolicy, ZeroPolicy};
    use crate::wrappers::TimeLimit;

    #[test]
    fn rollout_stops_at_time_limit() {
        let env = Reacher::with_default_config(PlanarArm::default(), 1);
        let mut env = TimeLimit::new(env, 10);
        let stats = rollout(&mut env, &mut ZeroPolicy::new(2), 100).unwrap();
        assert_eq!(stats.steps, 10);
        assert!(stats.truncated);
        assert!(!stats.terminated);
        assert_eq!(stats.successes, 0);
        assert!(stats.total_return < 0.0);
    }

    #[test]
    fn rollout_respects_max_steps() {
        let mut env = Reacher::with_default_config(PlanarArm::default(), 2);
        let mut policy = UniformPolicy::new(2, (-1.0, 1.0), 2);
        let stats = rollout(&mut env, &mut policy, 5).unwrap();
        assert!(stats.steps <= 5);
        assert!(!stats.truncated);
    }

    #[cfg(feature = "tch")]
    #[test]
    fn observation_tensor_is_a_single_row() {
        let obs = crate::observation::Observation::from_array(&[
            0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0,
        ]);
        let tensor = obs.to_tensor();
        assert_eq!(tensor.size(), vec![1, 10]);
        assert_eq!(tensor.kind(), tch::Kind::Float);
    }

    #[cfg(feature = "plot")]
    #[test]
    fn plots_returns_to_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("returns.png");
        let filename = path.to_str().unwrap();
        plot_returns(&[-0.5, 1.2, 3.4, 10.1], filename, "Reacher returns").unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
