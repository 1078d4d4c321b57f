use crate::utils;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Point {
            latitude,
            longitude,
        }
    }
}

/// Recorded points in the order they arrived. A track only grows, the one
/// exception being `clear`, which drops everything.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    points: Vec<Point>,
}

impl Track {
    pub fn new() -> Self {
        Track { points: Vec::new() }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Track { points }
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    // sum of great-circle distances between consecutive points, in meters
    pub fn distance_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| utils::haversine_distance_m(&pair[0], &pair[1]))
            .sum()
    }
}
