use crate::config::Config;
use crate::mean_shift;
use crate::neighborhood::WorkingSet;
use crate::seed::SeedPolicy;
use crate::types::Point;
use crate::{ClusterError, SeedNotRemainingSnafu};
use snafu::prelude::*;
use tracing::trace;

/// A cluster found by one pass, in normalized coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedCluster {
    /// Indices into the normalized points, sorted ascending.
    pub members: Vec<usize>,
    pub center: Point,
    pub iterations: usize,
}

/// One pass at a fixed radius: seed, converge, harvest the neighborhood and
/// remove it, until every point belongs to a cluster.
pub fn extract_clusters(
    normalized: &[Point],
    radius: f64,
    config: &Config,
    seed_policy: &impl SeedPolicy,
) -> Result<Vec<ExtractedCluster>, ClusterError> {
    let mut working = WorkingSet::new(normalized);
    let mut clusters = Vec::new();

    while !working.is_empty() {
        let seed = seed_policy.seed(working.remaining());
        ensure!(working.contains(seed), SeedNotRemainingSnafu { index: seed });

        let converged = mean_shift::converge(
            &working,
            working.point(seed),
            radius,
            config.tolerance,
            config.max_shift_iterations,
        )?;

        trace!(
            id = clusters.len(),
            seed,
            size = converged.members.len(),
            iterations = converged.iterations,
            "extracted cluster"
        );

        working.remove(&converged.members);
        trace!(remaining = working.len(), "removed cluster members");
        clusters.push(ExtractedCluster {
            members: converged.members,
            center: converged.center,
            iterations: converged.iterations,
        });
    }

    Ok(clusters)
}
