//! Reading points from delimited text and writing clusters back out.
//!
//! The input format is one record per line: the first record is the minimum
//! number of clusters, every following record is a point with comma-separated
//! coordinates.
//!
//! ```text
//! 2
//! 0.0,0.0
//! 0.0,0.01
//! 10,10
//! ```

use crate::types::{Clusters, Point};
use snafu::prelude::*;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const CLUSTER_SEPARATOR: &str = "-------";

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ParseError {
    #[snafu(display("could not open {}", path.display()))]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("could not read record"))]
    Record { source: csv::Error },

    #[snafu(display("input is empty, expected the minimum number of clusters"))]
    MissingMinClusters,

    #[snafu(display("line {line}: expected the minimum number of clusters, got {value:?}"))]
    InvalidMinClusters { line: u64, value: String },

    #[snafu(display("line {line}, field {field}: {value:?} is not a number"))]
    InvalidCoordinate {
        line: u64,
        field: usize,
        value: String,
        source: std::num::ParseFloatError,
    },
}

#[derive(Debug, Snafu)]
#[snafu(display("could not write clusters"))]
pub struct WriteError {
    source: std::io::Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    pub min_clusters: i64,
    pub points: Vec<Point>,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One point per line, a separator line after each cluster.
    #[default]
    Blocks,
    /// One point per line with the cluster id as the last column.
    Labeled,
}

pub fn read_input(reader: impl Read) -> Result<Input, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = reader.records();

    let first = records.next().context(MissingMinClustersSnafu)?;
    let first = first.context(RecordSnafu)?;
    let line = first.position().map_or(1, |p| p.line());
    let min_clusters = match first.len() {
        1 => first[0].parse::<i64>().ok(),
        _ => None,
    }
    .with_context(|| InvalidMinClustersSnafu {
        line,
        value: first.iter().collect::<Vec<_>>().join(","),
    })?;

    let mut points = Vec::new();
    for record in records {
        let record = record.context(RecordSnafu)?;
        let line = record.position().map_or(0, |p| p.line());
        let coords = record
            .iter()
            .enumerate()
            .map(|(field, value)| {
                value.parse::<f64>().context(InvalidCoordinateSnafu {
                    line,
                    field,
                    value,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        points.push(Point::new(coords));
    }

    Ok(Input {
        min_clusters,
        points,
    })
}

pub fn read_input_file(path: impl AsRef<Path>) -> Result<Input, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).context(OpenSnafu { path })?;
    read_input(std::io::BufReader::new(file))
}

fn write_coords(writer: &mut impl Write, point: &Point) -> std::io::Result<()> {
    for (i, x) in point.coords().iter().enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
        }
        write!(writer, "{x}")?;
    }
    Ok(())
}

pub fn write_clusters(
    mut writer: impl Write,
    clusters: &Clusters,
    format: OutputFormat,
) -> Result<(), WriteError> {
    let mut write = || -> std::io::Result<()> {
        for (id, cluster) in clusters {
            for point in &cluster.points {
                write_coords(&mut writer, point)?;
                match format {
                    OutputFormat::Blocks => writeln!(writer)?,
                    OutputFormat::Labeled => writeln!(writer, ",{id}")?,
                }
            }
            if format == OutputFormat::Blocks {
                writeln!(writer, "{CLUSTER_SEPARATOR}")?;
            }
        }
        writer.flush()
    };
    write().context(WriteSnafu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cluster;
    use pretty_assertions::assert_eq;

    fn parse(input: &str) -> Result<Input, ParseError> {
        read_input(input.as_bytes())
    }

    fn sample_clusters() -> Clusters {
        let a = Cluster {
            id: 0,
            points: vec![Point::from([0.0, 0.5]), Point::from([1.0, -2.25])],
            indices: vec![0, 2],
            center: Point::from([0.5, -0.875]),
        };
        let b = Cluster {
            id: 1,
            points: vec![Point::from([10.0, 10.0])],
            indices: vec![1],
            center: Point::from([10.0, 10.0]),
        };
        Clusters::from([(0, a), (1, b)])
    }

    #[test]
    fn reads_min_clusters_and_points() {
        let input = parse("3\n0,0\n1.5, -2\n 1e3,4\n").unwrap();
        assert_eq!(input.min_clusters, 3);
        assert_eq!(
            input.points,
            vec![
                Point::from([0.0, 0.0]),
                Point::from([1.5, -2.0]),
                Point::from([1000.0, 4.0]),
            ]
        );
    }

    #[test]
    fn negative_min_clusters() {
        let input = parse("-1\n0,0\n").unwrap();
        assert_eq!(input.min_clusters, -1);
    }

    #[test]
    fn skips_blank_lines() {
        let input = parse("2\n\n0,0\n\n1,1\n").unwrap();
        assert_eq!(input.points.len(), 2);
    }

    #[test]
    fn keeps_mixed_dimensions_for_the_core_to_reject() {
        let input = parse("0\n0,0\n1,1,1\n").unwrap();
        assert_eq!(input.points[0].dimensions(), 2);
        assert_eq!(input.points[1].dimensions(), 3);
    }

    #[test]
    fn empty_input() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, ParseError::MissingMinClusters));
    }

    #[test]
    fn min_clusters_not_an_integer() {
        for input in ["two\n0,0\n", "2.5\n", "2,3\n0,0\n"] {
            let err = parse(input).unwrap_err();
            assert!(
                matches!(err, ParseError::InvalidMinClusters { line: 1, .. }),
                "{input:?}: {err}"
            );
        }
    }

    #[test]
    fn bad_coordinate() {
        let err = parse("1\n0,0\n1,x\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::InvalidCoordinate {
                line: 3,
                field: 1,
                ..
            }
        ));
        assert_eq!(err.to_string(), "line 3, field 1: \"x\" is not a number");
    }

    #[test]
    fn empty_coordinate() {
        let err = parse("1\n0,\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidCoordinate { field: 1, .. }));
    }

    #[test]
    fn missing_file() {
        let err = read_input_file("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, ParseError::Open { .. }));
    }

    #[test]
    fn writes_blocks() {
        let mut out = Vec::new();
        write_clusters(&mut out, &sample_clusters(), OutputFormat::Blocks).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0,0.5\n1,-2.25\n-------\n10,10\n-------\n"
        );
    }

    #[test]
    fn writes_labeled() {
        let mut out = Vec::new();
        write_clusters(&mut out, &sample_clusters(), OutputFormat::Labeled).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0,0.5,0\n1,-2.25,0\n10,10,1\n"
        );
    }

    #[test]
    fn output_reads_back() {
        let clusters = sample_clusters();
        let mut out = b"0\n".to_vec();
        write_clusters(&mut out, &clusters, OutputFormat::Labeled).unwrap();

        let input = read_input(out.as_slice()).unwrap();
        assert_eq!(input.points.len(), 3);
        assert_eq!(input.points[1], Point::from([1.0, -2.25, 0.0]));
    }
}
