use crate::config::Config;
use crate::extraction::{extract_clusters, ExtractedCluster};
use crate::seed::SeedPolicy;
use crate::types::Point;
use crate::{
    ClusterError, RadiusExhaustedSnafu, TooManyPassesSnafu, UnreachableMinClustersSnafu,
};
use snafu::prelude::*;
use tracing::debug;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassSummary {
    pub radius: f64,
    pub clusters: usize,
    pub accepted: bool,
}

#[derive(Debug)]
pub struct Result {
    pub clusters: Vec<ExtractedCluster>,
    pub radius: f64,
    pub passes: Vec<PassSummary>,
}

pub fn initial_radius(dimensions: usize, config: &Config) -> f64 {
    (dimensions as f64).sqrt() * config.initial_radius_scale
}

/// Radius used by pass `k` (zero-based) given the radius of the pass before it.
#[inline]
pub fn shrink(radius: f64, k: usize, config: &Config) -> f64 {
    radius - radius * (k + 1) as f64 * config.shrink_step
}

fn accepts(min_clusters: i64, clusters: usize) -> bool {
    min_clusters <= 0 || clusters as i64 >= min_clusters
}

/// Runs passes over `normalized` with a shrinking radius until one yields at
/// least `min_clusters` clusters. Every pass starts from the full point set.
pub fn find_clusters(
    normalized: &[Point],
    min_clusters: i64,
    config: &Config,
    seed_policy: &impl SeedPolicy,
) -> std::result::Result<Result, ClusterError> {
    assert!(!normalized.is_empty());

    // Each pass yields at most one cluster per point
    ensure!(
        min_clusters <= normalized.len() as i64,
        UnreachableMinClustersSnafu {
            min_clusters,
            points: normalized.len(),
        }
    );

    let mut radius = initial_radius(normalized[0].dimensions(), config);
    let mut passes = Vec::new();
    let mut k = 0;

    loop {
        ensure!(
            k < config.max_passes,
            TooManyPassesSnafu {
                max_passes: config.max_passes,
                min_clusters,
            }
        );

        radius = shrink(radius, k, config);
        ensure!(
            radius > 0.0,
            RadiusExhaustedSnafu {
                passes: k,
                min_clusters,
            }
        );

        let clusters = extract_clusters(normalized, radius, config, seed_policy)?;
        let accepted = accepts(min_clusters, clusters.len());
        debug!(
            pass = k,
            radius,
            clusters = clusters.len(),
            accepted,
            "finished pass"
        );

        passes.push(PassSummary {
            radius,
            clusters: clusters.len(),
            accepted,
        });
        k += 1;

        if accepted {
            break Ok(Result {
                clusters,
                radius,
                passes,
            });
        }
    }
}
