use crate::route::Coordinate;

/// What the tracker can ask the map screen to do. Implementations own the
/// actual map/annotation views; the tracker only issues commands.
///
/// The tracker keeps a `Weak` reference to the surface, the surface owns the
/// tracker, so dropping the surface tears everything down.
pub trait PresentationSurface: Send + Sync {
    fn render_marker(&self, coordinate: Coordinate, label: &str);

    /// Draws a polyline through `coordinates` in order.
    fn render_line(&self, coordinates: &[Coordinate]);

    fn recenter(&self, center: Coordinate, width_m: f64, height_m: f64);

    fn set_tracking_indicator(&self, is_tracking: bool);

    fn show_callout(&self, text: &str, anchor: Coordinate);

    /// Removes every marker and line.
    fn clear_all(&self);
}
