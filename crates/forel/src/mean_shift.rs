use crate::neighborhood::WorkingSet;
use crate::types::Point;
use crate::{ClusterError, EmptyNeighborhoodSnafu, MeanShiftStalledSnafu};
use snafu::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Converged {
    pub center: Point,
    /// The neighborhood whose center of mass is `center`, sorted ascending.
    pub members: Vec<usize>,
    /// Number of neighborhoods computed.
    pub iterations: usize,
}

fn shift(
    working: &WorkingSet,
    from: &Point,
    radius: f64,
) -> Result<(Vec<usize>, Point), ClusterError> {
    let members = working.hypersphere(from, radius);
    let center = working
        .center_of_mass(&members)
        .context(EmptyNeighborhoodSnafu { radius })?;
    Ok((members, center))
}

/// Moves a center from `seed` to the center of mass of its neighborhood until
/// it moves by no more than `tolerance`.
///
/// The returned members are the neighborhood of the next-to-last center, i.e.
/// the one that produced the final center. No neighborhood is computed
/// around the final center itself.
pub fn converge(
    working: &WorkingSet,
    seed: &Point,
    radius: f64,
    tolerance: f64,
    max_iterations: usize,
) -> Result<Converged, ClusterError> {
    let (_, mut previous) = shift(working, seed, radius)?;
    let (mut members, mut center) = shift(working, &previous, radius)?;
    let mut iterations = 2;

    while center.distance(&previous) > tolerance {
        ensure!(
            iterations < max_iterations,
            MeanShiftStalledSnafu {
                iterations,
                movement: center.distance(&previous),
            }
        );

        let (next_members, next_center) = shift(working, &center, radius)?;
        members = next_members;
        previous = std::mem::replace(&mut center, next_center);
        iterations += 1;
    }

    Ok(Converged {
        center,
        members,
        iterations,
    })
}
