use std::sync::Weak;

use crate::config::TrackerConfig;
use crate::kv_store::KeyValueStore;
use crate::location_source::{Geocoder, LocationSource};
use crate::marker_processor::{MarkerKind, MarkerProcessor};
use crate::presentation::PresentationSurface;
use crate::route::{Coordinate, Route};
use crate::route_store::RouteStore;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackingState {
    Stopped,
    Tracking,
}

/// Turns raw location samples into a segmented route and into commands for
/// the map screen.
///
/// Every entry point is infallible: storage and geocoding failures are
/// logged and otherwise ignored, the worst case is a route that does not
/// survive a restart or a callout that never shows up.
pub struct RouteTracker<S: KeyValueStore> {
    config: TrackerConfig,
    state: TrackingState,
    route: Route,
    route_store: RouteStore<S>,
    marker_processor: MarkerProcessor,
    location_source: Box<dyn LocationSource>,
    geocoder: Box<dyn Geocoder>,
    surface: Weak<dyn PresentationSurface>,
}

impl<S: KeyValueStore> RouteTracker<S> {
    pub fn new(
        config: TrackerConfig,
        store: S,
        location_source: Box<dyn LocationSource>,
        geocoder: Box<dyn Geocoder>,
        surface: Weak<dyn PresentationSurface>,
    ) -> Self {
        let marker_processor = MarkerProcessor::new(config.marker_distance_m);
        RouteTracker {
            config,
            state: TrackingState::Stopped,
            route: Route::new(),
            route_store: RouteStore::new(store),
            marker_processor,
            location_source,
            geocoder,
            surface,
        }
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state == TrackingState::Tracking
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn route_store(&self) -> &RouteStore<S> {
        &self.route_store
    }

    pub fn distance_since_marker(&self) -> f64 {
        self.marker_processor.distance_since_marker()
    }

    fn with_surface<F>(&self, f: F)
    where
        F: FnOnce(&dyn PresentationSurface),
    {
        match self.surface.upgrade() {
            Some(surface) => f(surface.as_ref()),
            None => debug!("[tracker] surface is gone, dropping command"),
        }
    }

    fn marker_label(&self, kind: MarkerKind) -> &str {
        match kind {
            MarkerKind::Start => &self.config.start_marker_label,
            MarkerKind::Progress => &self.config.progress_marker_label,
        }
    }

    fn persist_route(&mut self) {
        if let Err(error) = self.route_store.save(&self.route) {
            warn!("[tracker] failed to save route, error:{}", error);
        }
    }

    fn persist_tracking(&mut self, is_tracking: bool) {
        if let Err(error) = self.route_store.save_tracking(is_tracking) {
            warn!("[tracker] failed to save tracking flag, error:{}", error);
        }
    }

    pub fn start(&mut self) {
        if self.is_tracking() {
            debug!("[tracker] `start` while already tracking");
            return;
        }
        self.state = TrackingState::Tracking;
        self.route.start_segment();
        self.marker_processor.reset();
        self.persist_tracking(true);
        self.with_surface(|surface| surface.set_tracking_indicator(true));
        self.location_source.start_updates();
        info!(
            "[tracker] tracking started, segment #{}",
            self.route.segments.len()
        );
    }

    pub fn stop(&mut self) {
        if !self.is_tracking() {
            debug!("[tracker] `stop` while not tracking");
            return;
        }
        self.state = TrackingState::Stopped;
        self.marker_processor.forget_last_sample();
        self.persist_tracking(false);
        self.with_surface(|surface| surface.set_tracking_indicator(false));
        self.location_source.stop_updates();
        info!("[tracker] tracking stopped");
    }

    pub fn toggle_tracking(&mut self) {
        if self.is_tracking() {
            self.stop();
        } else {
            self.start();
        }
    }

    pub fn reset(&mut self) {
        info!(
            "[tracker] reset, dropping {} segments",
            self.route.segments.len()
        );
        self.route.clear();
        if let Err(error) = self.route_store.clear() {
            warn!("[tracker] failed to clear saved route, error:{}", error);
        }
        self.stop();
        self.marker_processor.reset();
        self.with_surface(|surface| surface.clear_all());
    }

    /// Platform callback, may carry several samples. Only the most recent one
    /// is used.
    pub fn on_location_update(&mut self, coordinates: Vec<Coordinate>) {
        if let Some(coordinate) = coordinates.last() {
            self.on_sample(*coordinate);
        }
    }

    pub fn on_sample(&mut self, coordinate: Coordinate) {
        if !self.is_tracking() {
            debug!("[tracker] sample while stopped, ignored");
            return;
        }
        // `serde_json` writes NaN as null, which would make the saved route
        // unreadable
        if !coordinate.is_finite() {
            warn!("[tracker] non-finite sample dropped: {:?}", coordinate);
            return;
        }
        self.route.append(coordinate);
        self.persist_route();

        let step = self.marker_processor.process(coordinate);
        let viewport_span_m = self.config.viewport_span_m;
        self.with_surface(|surface| {
            if let Some(kind) = step.marker {
                surface.render_marker(coordinate, self.marker_label(kind));
            }
            if let Some(previous) = step.previous {
                surface.render_line(&[previous, coordinate]);
            }
            surface.recenter(coordinate, viewport_span_m, viewport_span_m);
        });
    }

    pub fn on_annotation_selected(&self, coordinate: Coordinate) {
        let surface = self.surface.clone();
        self.geocoder.reverse_geocode(
            coordinate,
            Box::new(move |result| {
                let placemarks = match result {
                    Ok(placemarks) => placemarks,
                    Err(error) => {
                        warn!("[tracker] reverse geocoding failed, error:{}", error);
                        return;
                    }
                };
                let Some(placemark) = placemarks.first() else {
                    debug!("[tracker] reverse geocoding returned nothing");
                    return;
                };
                let address = placemark.format_address();
                if let Some(surface) = surface.upgrade() {
                    surface.show_callout(&address, coordinate);
                }
            }),
        );
    }

    pub fn on_view_ready(&mut self) {
        self.route = self.route_store.load();
        info!(
            "[tracker] loaded route, segments:{}, coordinates:{}, distance:{:.0}m",
            self.route.segments.len(),
            self.route.num_of_coordinates(),
            self.route.distance_m()
        );
        self.replay_route();

        let should_track = self
            .route_store
            .load_tracking()
            .unwrap_or(self.config.track_on_first_launch);
        if should_track {
            self.start();
        } else {
            let is_tracking = self.is_tracking();
            self.with_surface(|surface| surface.set_tracking_indicator(is_tracking));
        }
    }

    // Markers are recomputed over the whole route, the accumulator carries
    // over segment boundaries.
    fn replay_route(&self) {
        let mut processor = MarkerProcessor::new(self.config.marker_distance_m);
        self.with_surface(|surface| {
            for segment in &self.route.segments {
                if segment.len() >= 2 {
                    surface.render_line(&segment.coordinates);
                }
            }
            for coordinate in self.route.coordinates() {
                if let Some(kind) = processor.process(*coordinate).marker {
                    surface.render_marker(*coordinate, self.marker_label(kind));
                }
            }
        });
    }
}
