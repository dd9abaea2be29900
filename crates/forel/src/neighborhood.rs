use crate::geometry::center_of_mass;
use crate::types::Point;

/// The points of one pass that have not been assigned to a cluster yet.
///
/// Points are referred to by their index in the normalized slice, so two
/// points with identical coordinates are still removed independently.
#[derive(Debug, Clone)]
pub struct WorkingSet<'a> {
    points: &'a [Point],
    // Always sorted ascending: built in order, only ever shrunk
    remaining: Vec<usize>,
}

impl<'a> WorkingSet<'a> {
    pub fn new(points: &'a [Point]) -> Self {
        WorkingSet {
            points,
            remaining: (0..points.len()).collect(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn remaining(&self) -> &[usize] {
        &self.remaining
    }

    pub fn contains(&self, index: usize) -> bool {
        self.remaining.binary_search(&index).is_ok()
    }

    pub fn point(&self, index: usize) -> &'a Point {
        &self.points[index]
    }

    /// Remaining points strictly closer than `radius` to `center`, in source order.
    pub fn hypersphere(&self, center: &Point, radius: f64) -> Vec<usize> {
        self.remaining
            .iter()
            .copied()
            .filter(|&i| self.points[i].distance(center) < radius)
            .collect()
    }

    pub fn center_of_mass(&self, members: &[usize]) -> Option<Point> {
        center_of_mass(members.iter().map(|&i| &self.points[i]))
    }

    /// Removes `members`, which must be sorted ascending (as returned by
    /// [`WorkingSet::hypersphere`]).
    pub fn remove(&mut self, members: &[usize]) {
        debug_assert!(members.windows(2).all(|w| w[0] < w[1]));
        self.remaining
            .retain(|index| members.binary_search(index).is_err());
    }
}
