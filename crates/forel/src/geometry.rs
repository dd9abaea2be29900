use crate::config::DegenerateDimensions;
use crate::types::Point;
use crate::{DegenerateDimensionSnafu, InputError};
use snafu::prelude::*;
use tracing::warn;

/// Per-dimension minimum and maximum of a point set.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Returns `None` for an empty set. All points must share the dimension
    /// of the first one.
    pub fn from_points(points: &[Point]) -> Option<BoundingBox> {
        let first = points.first()?;
        let mut min = first.coords().to_vec();
        let mut max = first.coords().to_vec();

        for point in &points[1..] {
            for (i, &x) in point.coords().iter().enumerate() {
                if x < min[i] {
                    min[i] = x;
                }
                if x > max[i] {
                    max[i] = x;
                }
            }
        }

        Some(BoundingBox {
            min: Point::new(min),
            max: Point::new(max),
        })
    }

    pub fn dimensions(&self) -> usize {
        self.min.dimensions()
    }
}

/// Coordinate-wise arithmetic mean, `None` for an empty set.
pub fn center_of_mass<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Point> {
    let mut points = points.into_iter();
    let mut sums = points.next()?.coords().to_vec();
    let mut count = 1usize;

    for point in points {
        for (sum, x) in sums.iter_mut().zip(point.coords()) {
            *sum += x;
        }
        count += 1;
    }

    let count = count as f64;
    for sum in &mut sums {
        *sum /= count;
    }
    Some(Point::new(sums))
}

/// Linear rescaling of every dimension of a bounding box onto `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Normalization {
    bounds: BoundingBox,
    spans: Vec<f64>,
}

impl Normalization {
    pub fn new(bounds: BoundingBox, policy: DegenerateDimensions) -> Result<Self, InputError> {
        let spans: Vec<f64> = bounds
            .min
            .coords()
            .iter()
            .zip(bounds.max.coords())
            .map(|(min, max)| max - min)
            .collect();

        for (dimension, &span) in spans.iter().enumerate() {
            if span != 0.0 {
                continue;
            }
            ensure!(
                policy == DegenerateDimensions::Collapse,
                DegenerateDimensionSnafu {
                    dimension,
                    value: bounds.min[dimension],
                }
            );
            warn!(
                dimension,
                value = bounds.min[dimension],
                "all points share one coordinate, collapsing the dimension"
            );
        }

        Ok(Normalization { bounds, spans })
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// `(x - min) / (max - min)` per dimension. A collapsed dimension maps to 0.
    pub fn normalize(&self, point: &Point) -> Point {
        let coords = point
            .coords()
            .iter()
            .zip(self.bounds.min.coords())
            .zip(&self.spans)
            .map(|((x, min), &span)| if span == 0.0 { 0.0 } else { (x - min) / span })
            .collect();
        Point::new(coords)
    }

    pub fn denormalize(&self, point: &Point) -> Point {
        let coords = point
            .coords()
            .iter()
            .zip(self.bounds.min.coords())
            .zip(&self.spans)
            .map(|((x, min), span)| x.mul_add(*span, *min))
            .collect();
        Point::new(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn points(raw: &[&[f64]]) -> Vec<Point> {
        raw.iter().map(|p| Point::new(p.to_vec())).collect()
    }

    fn assert_close(a: &Point, b: &Point) {
        assert_eq!(a.dimensions(), b.dimensions());
        for i in 0..a.dimensions() {
            assert!((a[i] - b[i]).abs() < 1e-9, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn bounding_box_per_dimension() {
        let pts = points(&[&[1.0, 5.0, -2.0], &[3.0, -1.0, 0.0], &[2.0, 0.0, 7.0]]);
        let bounds = BoundingBox::from_points(&pts).unwrap();
        assert_eq!(bounds.min, Point::from([1.0, -1.0, -2.0]));
        assert_eq!(bounds.max, Point::from([3.0, 5.0, 7.0]));
        assert_eq!(bounds.dimensions(), 3);
    }

    #[test]
    fn bounding_box_empty() {
        assert_eq!(BoundingBox::from_points(&[]), None);
    }

    #[test]
    fn center_of_mass_is_mean() {
        let pts = points(&[&[0.0, 0.0], &[2.0, 0.0], &[1.0, 3.0]]);
        let center = center_of_mass(&pts).unwrap();
        assert_close(&center, &Point::from([1.0, 1.0]));
    }

    #[test]
    fn center_of_mass_empty() {
        assert_eq!(center_of_mass(&[]), None);
    }

    #[test]
    fn normalize_maps_bounds_to_unit_cube() {
        let pts = points(&[&[10.0, -4.0], &[20.0, 4.0], &[15.0, 0.0]]);
        let bounds = BoundingBox::from_points(&pts).unwrap();
        let norm = Normalization::new(bounds, DegenerateDimensions::Reject).unwrap();

        assert_close(&norm.normalize(&pts[0]), &Point::from([0.0, 0.0]));
        assert_close(&norm.normalize(&pts[1]), &Point::from([1.0, 1.0]));
        assert_close(&norm.normalize(&pts[2]), &Point::from([0.5, 0.5]));
    }

    #[test]
    fn round_trip() {
        let pts = points(&[&[-3.5, 100.0, 0.001], &[12.25, -50.0, 0.002]]);
        let bounds = BoundingBox::from_points(&pts).unwrap();
        let norm = Normalization::new(bounds, DegenerateDimensions::Reject).unwrap();

        let probes = points(&[
            &[-3.5, 100.0, 0.001],
            &[0.0, 0.0, 0.0015],
            &[42.0, -1000.0, 1.0],
        ]);
        for p in &probes {
            assert_close(&norm.denormalize(&norm.normalize(p)), p);
        }
    }

    #[test]
    fn degenerate_dimension_rejected() {
        let pts = points(&[&[1.0, 7.0], &[2.0, 7.0]]);
        let bounds = BoundingBox::from_points(&pts).unwrap();
        let err = Normalization::new(bounds, DegenerateDimensions::Reject).unwrap_err();
        assert!(matches!(
            err,
            InputError::DegenerateDimension { dimension: 1, .. }
        ));
    }

    #[test]
    fn degenerate_dimension_collapsed() {
        let pts = points(&[&[1.0, 7.0], &[2.0, 7.0]]);
        let bounds = BoundingBox::from_points(&pts).unwrap();
        let norm = Normalization::new(bounds, DegenerateDimensions::Collapse).unwrap();

        let normalized = norm.normalize(&pts[1]);
        assert_eq!(normalized, Point::from([1.0, 0.0]));
        assert!(normalized.coords().iter().all(|x| x.is_finite()));
        assert_close(&norm.denormalize(&normalized), &pts[1]);
    }
}
