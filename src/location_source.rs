use anyhow::Result;

use crate::route::Coordinate;

/// The platform location stream. Samples are pushed into
/// `RouteTracker::on_location_update` by whoever owns the platform callback;
/// the tracker only turns the stream on and off.
pub trait LocationSource: Send {
    fn start_updates(&mut self);
    fn stop_updates(&mut self);
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placemark {
    pub name: Option<String>,
    pub locality: Option<String>,
    pub administrative_area: Option<String>,
    pub country: Option<String>,
}

impl Placemark {
    /// Multi-line address, one field per line, missing fields left empty.
    pub fn format_address(&self) -> String {
        let field = |x: &Option<String>| x.as_deref().unwrap_or_default().to_string();
        format!(
            "{},\n{},\n{},\n{}",
            field(&self.name),
            field(&self.locality),
            field(&self.administrative_area),
            field(&self.country)
        )
    }
}

pub type GeocodeCompletion = Box<dyn FnOnce(Result<Vec<Placemark>>) + Send>;

pub trait Geocoder: Send + Sync {
    /// Resolves `coordinate` to placemarks. `completion` may be called later
    /// from the platform callback, it must be called at most once. Requests
    /// are never cancelled.
    fn reverse_geocode(&self, coordinate: Coordinate, completion: GeocodeCompletion);
}
