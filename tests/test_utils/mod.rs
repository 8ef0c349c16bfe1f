#![allow(dead_code)]

use anyhow::Result;
use location_tracking_core::{
    kv_store::KeyValueStore,
    location_source::{GeocodeCompletion, Geocoder, LocationSource, Placemark},
    presentation::PresentationSurface,
    route::EARTH_RADIUS,
    Coordinate, RouteTracker, TrackerConfig,
};
use std::sync::{Arc, Mutex, Weak};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Marker {
        coordinate: Coordinate,
        label: String,
    },
    Line(Vec<Coordinate>),
    Recenter {
        center: Coordinate,
        width_m: f64,
        height_m: f64,
    },
    TrackingIndicator(bool),
    Callout {
        text: String,
        anchor: Coordinate,
    },
    ClearAll,
}

#[derive(Default)]
pub struct RecordingSurface {
    commands: Mutex<Vec<Command>>,
}

impl RecordingSurface {
    pub fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.lock().unwrap())
    }

    pub fn markers(commands: &[Command]) -> Vec<(Coordinate, String)> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Marker { coordinate, label } => Some((*coordinate, label.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn lines(commands: &[Command]) -> Vec<Vec<Coordinate>> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Line(coordinates) => Some(coordinates.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, command: Command) {
        self.commands.lock().unwrap().push(command);
    }
}

impl PresentationSurface for RecordingSurface {
    fn render_marker(&self, coordinate: Coordinate, label: &str) {
        self.push(Command::Marker {
            coordinate,
            label: label.to_string(),
        });
    }

    fn render_line(&self, coordinates: &[Coordinate]) {
        self.push(Command::Line(coordinates.to_vec()));
    }

    fn recenter(&self, center: Coordinate, width_m: f64, height_m: f64) {
        self.push(Command::Recenter {
            center,
            width_m,
            height_m,
        });
    }

    fn set_tracking_indicator(&self, is_tracking: bool) {
        self.push(Command::TrackingIndicator(is_tracking));
    }

    fn show_callout(&self, text: &str, anchor: Coordinate) {
        self.push(Command::Callout {
            text: text.to_string(),
            anchor,
        });
    }

    fn clear_all(&self) {
        self.push(Command::ClearAll);
    }
}

#[derive(Clone, Default)]
pub struct FakeLocationSource {
    pub running: Arc<Mutex<bool>>,
    pub start_count: Arc<Mutex<usize>>,
}

impl FakeLocationSource {
    pub fn is_running(&self) -> bool {
        *self.running.lock().unwrap()
    }

    pub fn start_count(&self) -> usize {
        *self.start_count.lock().unwrap()
    }
}

impl LocationSource for FakeLocationSource {
    fn start_updates(&mut self) {
        *self.running.lock().unwrap() = true;
        *self.start_count.lock().unwrap() += 1;
    }

    fn stop_updates(&mut self) {
        *self.running.lock().unwrap() = false;
    }
}

pub fn placemark(name: &str) -> Placemark {
    Placemark {
        name: Some(name.to_string()),
        locality: Some("Kadikoy".to_string()),
        administrative_area: Some("Istanbul".to_string()),
        country: Some("Turkey".to_string()),
    }
}

/// Completes right away with a clone of the configured answer.
pub struct ImmediateGeocoder {
    answer: std::result::Result<Vec<Placemark>, String>,
}

impl ImmediateGeocoder {
    pub fn ok(placemarks: Vec<Placemark>) -> Self {
        ImmediateGeocoder {
            answer: Ok(placemarks),
        }
    }

    pub fn failing() -> Self {
        ImmediateGeocoder {
            answer: Err("network unavailable".to_string()),
        }
    }
}

impl Geocoder for ImmediateGeocoder {
    fn reverse_geocode(&self, _coordinate: Coordinate, completion: GeocodeCompletion) {
        let result: Result<Vec<Placemark>> = match &self.answer {
            Ok(placemarks) => Ok(placemarks.clone()),
            Err(message) => Err(anyhow::anyhow!("{}", message)),
        };
        completion(result);
    }
}

/// Holds on to completions until the test decides to fire them.
#[derive(Clone, Default)]
pub struct DeferredGeocoder {
    pending: Arc<Mutex<Vec<(Coordinate, GeocodeCompletion)>>>,
}

impl DeferredGeocoder {
    pub fn num_of_pending(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    pub fn complete(&self, index: usize, result: Result<Vec<Placemark>>) {
        let (_, completion) = self.pending.lock().unwrap().remove(index);
        completion(result);
    }
}

impl Geocoder for DeferredGeocoder {
    fn reverse_geocode(&self, coordinate: Coordinate, completion: GeocodeCompletion) {
        self.pending.lock().unwrap().push((coordinate, completion));
    }
}

/// A point `meters` due north of `from`, along the meridian the haversine
/// distance between the two is exact up to float error.
pub fn north_of(from: Coordinate, meters: f64) -> Coordinate {
    Coordinate::new(
        from.latitude + (meters / EARTH_RADIUS).to_degrees(),
        from.longitude,
    )
}

pub fn walk_north(start: Coordinate, steps_m: &[f64]) -> Vec<Coordinate> {
    let mut current = start;
    let mut result = vec![start];
    for step in steps_m {
        current = north_of(current, *step);
        result.push(current);
    }
    result
}

pub const ORIGIN: Coordinate = Coordinate {
    latitude: 41.0082,
    longitude: 28.9784,
};

pub struct Fixture<S: KeyValueStore> {
    pub tracker: RouteTracker<S>,
    pub surface: Arc<RecordingSurface>,
    pub location_source: FakeLocationSource,
}

pub fn fixture_with<S: KeyValueStore>(
    store: S,
    config: TrackerConfig,
    geocoder: Box<dyn Geocoder>,
) -> Fixture<S> {
    init_logging();
    let surface = Arc::new(RecordingSurface::default());
    let location_source = FakeLocationSource::default();
    let weak = Arc::downgrade(&surface);
    let weak_surface: Weak<dyn PresentationSurface> = weak;
    let tracker = RouteTracker::new(
        config,
        store,
        Box::new(location_source.clone()),
        geocoder,
        weak_surface,
    );
    Fixture {
        tracker,
        surface,
        location_source,
    }
}

pub fn fixture<S: KeyValueStore>(store: S) -> Fixture<S> {
    fixture_with(
        store,
        TrackerConfig::default(),
        Box::new(ImmediateGeocoder::failing()),
    )
}
