use crate::route::Coordinate;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    Start,
    Progress,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MarkerStep {
    /// The sample before this one, `None` for the first sample after a reset.
    pub previous: Option<Coordinate>,
    pub marker: Option<MarkerKind>,
}

/* Decides where markers go. The first sample after a reset is a start
marker, after that a progress marker is emitted on the first sample that
pushes the distance travelled since the last marker to the threshold.
The same processor drives both live tracking and the replay of a loaded
route so the two can never disagree.
*/
pub struct MarkerProcessor {
    threshold_m: f64,
    last_sample: Option<Coordinate>,
    distance_since_marker: f64,
}

impl MarkerProcessor {
    pub fn new(threshold_m: f64) -> Self {
        MarkerProcessor {
            threshold_m,
            last_sample: None,
            distance_since_marker: 0.0,
        }
    }

    pub fn distance_since_marker(&self) -> f64 {
        self.distance_since_marker
    }

    pub fn reset(&mut self) {
        self.last_sample = None;
        self.distance_since_marker = 0.0;
    }

    pub fn forget_last_sample(&mut self) {
        self.last_sample = None;
    }

    pub fn process(&mut self, coordinate: Coordinate) -> MarkerStep {
        let previous = self.last_sample.replace(coordinate);
        let marker = match &previous {
            None => {
                self.distance_since_marker = 0.0;
                Some(MarkerKind::Start)
            }
            Some(previous) => {
                self.distance_since_marker += previous.haversine_distance(&coordinate);
                if self.distance_since_marker >= self.threshold_m {
                    self.distance_since_marker = 0.0;
                    Some(MarkerKind::Progress)
                } else {
                    None
                }
            }
        };
        MarkerStep { previous, marker }
    }
}
