use std::collections::BTreeMap;
use std::ops::Index;

/// A point in D-dimensional space.
#[derive(Debug, Clone, PartialEq)]
pub struct Point(Vec<f64>);

impl Point {
    pub fn new(coords: Vec<f64>) -> Self {
        Point(coords)
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    pub fn into_coords(self) -> Vec<f64> {
        self.0
    }

    /// Euclidean distance. Both points must have the same number of dimensions.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        self.0
            .iter()
            .zip(&other.0)
            .fold(0.0f64, |acc, (a, b)| {
                let d = a - b;
                d.mul_add(d, acc)
            })
            .sqrt()
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Point(coords)
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coords: [f64; N]) -> Self {
        Point(coords.to_vec())
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

/// One cluster of a finished run, in the caller's coordinate space.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Sequential id, assigned in extraction order.
    pub id: usize,
    pub points: Vec<Point>,
    /// Positions of `points` in the input slice.
    pub indices: Vec<usize>,
    /// The converged mean-shift center.
    pub center: Point,
}

impl Cluster {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub type Clusters = BTreeMap<usize, Cluster>;
