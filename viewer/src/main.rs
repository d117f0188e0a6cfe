use std::env;
use std::fs;
use std::io;

use delaunay::{triangulate, Point};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_POINT_COUNT: usize = 30;
const DEFAULT_EXTENT: f64 = 100.0;

fn parse_points(text: &str) -> io::Result<Vec<Point>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut fields = line.split_whitespace();
            let x: f64 = fields
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, format!("bad point line: {line}")))?;
            let y: f64 = fields
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, format!("bad point line: {line}")))?;
            Ok(Point::new(x, y))
        })
        .collect()
}

fn random_points(n: usize, extent: f64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(0xDE1AD);
    (0..n)
        .map(|_| Point::new(rng.gen_range(0.0..extent), rng.gen_range(0.0..extent)))
        .collect()
}

/// Prints every undirected real edge exactly once, by only emitting an edge
/// when the owning triangle's arena index orders before its neighbor's —
/// the index-based analog of the original's pointer-ordered `fill_buffer`.
fn print_edges(triangles: &[delaunay::Triangle], points: &[Point]) {
    let mut count = 0;
    for (i, tri) in triangles.iter().enumerate() {
        for (e, nb) in tri.neighbors.iter().enumerate() {
            let nb = nb.expect("triangulate always returns fully stitched triangles");
            if nb.tri <= i {
                continue;
            }
            let (a_idx, b_idx) = other_two(e);
            if let (Some(a), Some(b)) = (tri.vertices[a_idx], tri.vertices[b_idx]) {
                println!("{} {}", points[a], points[b]);
                count += 1;
            }
        }
    }
    log::info!("printed {count} edges");
}

fn other_two(edge: usize) -> (usize, usize) {
    match edge {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

fn main() -> io::Result<()> {
    stderrlog::new()
        .module(module_path!())
        .verbosity(log::LevelFilter::Info)
        .init()
        .expect("logger can only be initialized once");

    let points = match env::args().nth(1) {
        Some(path) => {
            log::info!("reading points from {path}");
            parse_points(&fs::read_to_string(path)?)?
        }
        None => {
            log::info!("no point file given, generating {DEFAULT_POINT_COUNT} random points");
            random_points(DEFAULT_POINT_COUNT, DEFAULT_EXTENT)
        }
    };

    log::info!("triangulating {} points", points.len());
    let triangles = triangulate(&points);
    let real = triangles
        .iter()
        .filter(|t| t.vertices.iter().all(Option::is_some))
        .count();
    log::info!(
        "{} triangle slots ({} real, {} hull ghosts)",
        triangles.len(),
        real,
        triangles.len() - real
    );

    print_edges(&triangles, &points);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_points_reads_whitespace_separated_pairs() {
        let points = parse_points("0 0\n1.5 2.5\n\n3 4\n").unwrap();
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(1.5, 2.5), Point::new(3.0, 4.0)]);
    }

    #[test]
    fn parse_points_rejects_malformed_lines() {
        assert!(parse_points("not a point").is_err());
    }
}
