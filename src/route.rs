use geo::{Distance, Haversine, Point};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

// unit: meter, the mean radius `Haversine` uses
pub const EARTH_RADIUS: f64 = 6371008.8;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Great-circle distance in meters.
    pub fn haversine_distance(&self, other: &Coordinate) -> f64 {
        Haversine::distance(
            Point::new(self.longitude, self.latitude),
            Point::new(other.longitude, other.latitude),
        )
    }
}

/// One continuous tracking session. Serialized as a bare list of coordinates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Segment {
    pub coordinates: Vec<Coordinate>,
}

impl Segment {
    pub fn new() -> Self {
        Segment {
            coordinates: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn distance_m(&self) -> f64 {
        self.coordinates
            .iter()
            .tuple_windows()
            .map(|(a, b)| a.haversine_distance(b))
            .sum()
    }
}

/// All sessions, oldest first. Only the last segment is ever appended to.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route {
    pub segments: Vec<Segment>,
}

impl Route {
    pub fn new() -> Self {
        Route {
            segments: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn start_segment(&mut self) {
        self.segments.push(Segment::new());
    }

    // opens a segment first if there is none
    pub fn append(&mut self, coordinate: Coordinate) {
        if self.segments.is_empty() {
            self.start_segment();
        }
        if let Some(last) = self.segments.last_mut() {
            last.coordinates.push(coordinate);
        }
    }

    pub fn coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.segments.iter().flat_map(|s| s.coordinates.iter())
    }

    pub fn num_of_coordinates(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    // distance is not accumulated across segment boundaries
    pub fn distance_m(&self) -> f64 {
        self.segments.iter().map(Segment::distance_m).sum()
    }
}
