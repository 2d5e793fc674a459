//! Choice of the winning candidate.

use super::cluster::Cluster;

/// Index of the best refined cluster, if any is acceptable.
///
/// `min_score` is named after the legacy parameter but acts as a ceiling on
/// the fitness error: a score is accepted only when strictly below it. The
/// lowest accepted score wins; on ties the earlier cluster is kept.
pub fn select_best(clusters: &[Cluster], min_score: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, cluster) in clusters.iter().enumerate() {
        if cluster.icp_pose.is_none() {
            continue;
        }
        let Some(score) = cluster.icp_score else {
            continue;
        };
        if score.is_nan() || score >= min_score {
            continue;
        }
        match best {
            Some((_, best_score)) if best_score <= score => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Point2D, PointCloud2D, Pose2D, Stamped};

    fn scored(score: Option<f32>) -> Cluster {
        let cloud = PointCloud2D::from_points(&[Point2D::new(1.0, 0.0), Point2D::new(1.0, 0.5)]);
        let mut cluster = Cluster::new(Stamped::new(cloud, "laser", 0));
        if let Some(score) = score {
            cluster.icp_score = Some(score);
            cluster.icp_pose = Some(Stamped::new(Pose2D::identity(), "map", 0));
        }
        cluster
    }

    #[test]
    fn test_picks_lowest_below_threshold() {
        let clusters = vec![scored(Some(0.05)), scored(Some(0.02))];
        assert_eq!(select_best(&clusters, 0.03), Some(1));
    }

    #[test]
    fn test_nothing_below_threshold() {
        let clusters = vec![scored(Some(0.02)), scored(Some(0.05))];
        assert_eq!(select_best(&clusters, 0.01), None);
    }

    #[test]
    fn test_threshold_is_strict() {
        let clusters = vec![scored(Some(0.03))];
        assert_eq!(select_best(&clusters, 0.03), None);
    }

    #[test]
    fn test_ties_keep_first() {
        let clusters = vec![scored(None), scored(Some(0.004)), scored(Some(0.004))];
        assert_eq!(select_best(&clusters, 0.01), Some(1));
    }

    #[test]
    fn test_unscored_and_nan_ignored() {
        let clusters = vec![scored(None), scored(Some(f32::NAN))];
        assert_eq!(select_best(&clusters, 0.01), None);
        assert_eq!(select_best(&[], 0.01), None);
    }
}
