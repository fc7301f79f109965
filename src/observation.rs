use serde::{Deserialize, Serialize};

pub const OBS_DIM: usize = 10;

/// [qpos(2), qvel(2), fingertip(3), target(3)]，使用物理后端的原生单位，不做归一化
///
/// 全程保持 f64 精度，距离也由 f64 计算；只在转成张量时才降为 f32
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub joint_positions: [f64; 2],
    pub joint_velocities: [f64; 2],
    pub fingertip: [f64; 3],
    pub target: [f64; 3],
}

impl Observation {
    pub fn to_array(&self) -> [f64; OBS_DIM] {
        let mut out = [0.0; OBS_DIM];
        out[0..2].copy_from_slice(&self.joint_positions);
        out[2..4].copy_from_slice(&self.joint_velocities);
        out[4..7].copy_from_slice(&self.fingertip);
        out[7..10].copy_from_slice(&self.target);
        out
    }

    pub fn from_array(values: &[f64; OBS_DIM]) -> Self {
        Self {
            joint_positions: [values[0], values[1]],
            joint_velocities: [values[2], values[3]],
            fingertip: [values[4], values[5], values[6]],
            target: [values[7], values[8], values[9]],
        }
    }

    /// 指尖到目标的欧氏距离
    pub fn distance(&self) -> f64 {
        distance(&self.fingertip, &self.target)
    }
}

pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

pub fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    norm(&[a[0] - b[0], a[1] - b[1], a[2] - b[2]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_qpos_qvel_fingertip_target() {
        let obs = Observation {
            joint_positions: [1.0, 2.0],
            joint_velocities: [3.0, 4.0],
            fingertip: [5.0, 6.0, 7.0],
            target: [8.0, 9.0, 10.0],
        };
        let arr = obs.to_array();
        assert_eq!(arr, [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        assert_eq!(Observation::from_array(&arr), obs);
    }

    #[test]
    fn distance_is_euclidean() {
        let obs = Observation {
            joint_positions: [0.0; 2],
            joint_velocities: [0.0; 2],
            fingertip: [0.0, 0.0, 0.0],
            target: [3.0, 4.0, 0.0],
        };
        assert!((obs.distance() - 5.0).abs() < 1e-12);
        assert!((norm(&[-3.0, 4.0]) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn distance_keeps_sub_f32_resolution() {
        let obs = Observation {
            joint_positions: [0.0; 2],
            joint_velocities: [0.0; 2],
            fingertip: [0.1, 0.0, 0.1],
            target: [0.1 + 1e-9, 0.0, 0.1],
        };
        // f32 下 0.1 附近的间距约为 7.5e-9，这个差值会被抹掉
        assert_eq!(0.1_f32, (0.1 + 1e-9) as f32);
        assert!((obs.distance() - 1e-9).abs() < 1e-15);
    }
}
