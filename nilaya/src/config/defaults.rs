//! Default value functions for serde deserialization.

pub fn distance_threshold() -> f32 {
    0.04
}

pub fn min_points() -> usize {
    25
}

pub fn max_points() -> usize {
    400
}

pub fn min_distance() -> f32 {
    0.0
}

pub fn max_distance() -> f32 {
    2.0
}

pub fn min_width() -> f32 {
    0.3
}

pub fn max_width() -> f32 {
    1.0
}

pub fn icp_min_score() -> f32 {
    0.01
}

pub fn icp_max_iter() -> u32 {
    300
}

pub fn icp_max_corr_dis() -> f32 {
    0.25
}

pub fn icp_max_trans_eps() -> f32 {
    1e-9
}

pub fn icp_max_eucl_fit_eps() -> f32 {
    1e-9
}
