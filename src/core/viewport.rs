use crate::core::{
    constants::{OSM_MAX_ZOOM, TILE_SIZE},
    geo::{LatLng, LatLngBounds, Point, WORLD_EXTENT},
};
use serde::{Deserialize, Serialize};

/// What part of the world the map container shows.
///
/// Pixel positions are relative to the container's top-left corner; screen y
/// grows downwards while projected y grows northwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
    /// Container size in pixels
    pub size: Point,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let max_zoom = f64::from(OSM_MAX_ZOOM);
        Self {
            center: Self::clamp_to_world(center),
            zoom: zoom.clamp(0.0, max_zoom),
            size,
            min_zoom: 0.0,
            max_zoom,
        }
    }

    pub fn set_center(&mut self, center: LatLng) {
        self.center = Self::clamp_to_world(center);
    }

    /// Centres on an EPSG:3857 position
    pub fn set_center_projected(&mut self, projected: Point) {
        self.set_center(LatLng::from_mercator(projected));
    }

    pub fn projected_center(&self) -> Point {
        self.center.to_mercator()
    }

    /// Clamped to `min_zoom..=max_zoom`
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    fn resolution_at(zoom: f64) -> f64 {
        WORLD_EXTENT / (f64::from(TILE_SIZE) * zoom.exp2())
    }

    /// Projected units per pixel at the current zoom
    pub fn resolution(&self) -> f64 {
        Self::resolution_at(self.zoom)
    }

    /// Position in the global pixel grid of zoom `zoom` (the current zoom when
    /// `None`), origin at the north-west corner of the world. Tile `(x, y)`
    /// covers `x * 256 .. (x + 1) * 256` of this grid.
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let resolution = Self::resolution_at(zoom.unwrap_or(self.zoom));
        let projected = lat_lng.to_mercator();
        let half_world = WORLD_EXTENT / 2.0;
        Point::new(
            (projected.x + half_world) / resolution,
            (half_world - projected.y) / resolution,
        )
    }

    /// Inverse of [`Viewport::project`]
    pub fn unproject(&self, world_pixel: &Point, zoom: Option<f64>) -> LatLng {
        let resolution = Self::resolution_at(zoom.unwrap_or(self.zoom));
        let half_world = WORLD_EXTENT / 2.0;
        LatLng::from_mercator(Point::new(
            world_pixel.x * resolution - half_world,
            half_world - world_pixel.y * resolution,
        ))
    }

    /// Geographic extent of the container
    pub fn bounds(&self) -> LatLngBounds {
        let north_west = self.pixel_to_lat_lng(&Point::default());
        let south_east = self.pixel_to_lat_lng(&self.size);
        LatLngBounds::new(
            LatLng::new(south_east.lat, north_west.lng),
            LatLng::new(north_west.lat, south_east.lng),
        )
    }

    fn middle(&self) -> Point {
        self.size.multiply(0.5)
    }

    /// EPSG:3857 position to container pixel
    pub fn projected_to_pixel(&self, projected: &Point) -> Point {
        let offset = projected
            .subtract(&self.projected_center())
            .multiply(1.0 / self.resolution());
        Point::new(self.middle().x + offset.x, self.middle().y - offset.y)
    }

    /// Container pixel to EPSG:3857 position
    pub fn pixel_to_projected(&self, pixel: &Point) -> Point {
        let from_middle = pixel.subtract(&self.middle()).multiply(self.resolution());
        let center = self.projected_center();
        Point::new(center.x + from_middle.x, center.y - from_middle.y)
    }

    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        self.projected_to_pixel(&lat_lng.to_mercator())
    }

    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        LatLng::from_mercator(self.pixel_to_projected(pixel))
    }

    /// Drags the content by `delta` pixels, so the centre moves the opposite
    /// way. Returns how far the centre moved in pixels once clamping to the
    /// world is taken into account.
    pub fn pan(&mut self, delta: Point) -> Point {
        let before = self.projected_center();
        let target = self.pixel_to_projected(&self.middle().subtract(&delta));
        self.set_center_projected(target);
        self.middle().subtract(&self.projected_to_pixel(&before))
    }

    /// Changes zoom. With a `focus_point` the coordinate under that pixel
    /// stays put, otherwise the centre does.
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (zoom - self.zoom).abs() < 0.001 {
            return;
        }

        let anchor = focus_point.map(|pixel| (pixel, self.pixel_to_projected(&pixel)));
        self.zoom = zoom;
        if let Some((pixel, projected)) = anchor {
            let drift = pixel.subtract(&self.projected_to_pixel(&projected));
            self.pan(drift);
        }
    }

    fn clamp_to_world(center: LatLng) -> LatLng {
        LatLng::new(
            LatLng::clamp_lat(center.lat),
            center.lng.clamp(-180.0, 180.0),
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::default(), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::{TileCoord, MAX_LATITUDE};

    fn campus_viewport() -> Viewport {
        Viewport::new(
            LatLng::from_lon_lat([39.71065, 47.24011]),
            17.0,
            Point::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_center_maps_to_middle_of_container() {
        let viewport = campus_viewport();
        let pixel = viewport.lat_lng_to_pixel(&viewport.center);

        assert!((pixel.x - 400.0).abs() < 1e-6);
        assert!((pixel.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_round_trip_and_orientation() {
        let viewport = campus_viewport();
        let manege = LatLng::from_lon_lat([39.70892, 47.24088]);

        let pixel = viewport.lat_lng_to_pixel(&manege);
        let back = viewport.pixel_to_lat_lng(&pixel);
        assert!((back.lat - manege.lat).abs() < 1e-9);
        assert!((back.lng - manege.lng).abs() < 1e-9);

        // north-west of the centre: up and to the left
        assert!(pixel.x < 400.0);
        assert!(pixel.y < 300.0);
    }

    #[test]
    fn test_set_center_clamps_to_world() {
        let mut viewport = campus_viewport();
        viewport.set_center(LatLng::new(89.9, 200.0));
        assert_eq!(viewport.center.lat, MAX_LATITUDE);
        assert_eq!(viewport.center.lng, 180.0);

        let target = LatLng::from_lon_lat([39.70892, 47.24088]).to_mercator();
        viewport.set_center_projected(target);
        assert!(viewport.projected_center().distance_to(&target) < 1e-6);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_pan_moves_center_against_drag() {
        let mut viewport = campus_viewport();
        let before = viewport.center;

        // dragging the content right reveals what lies to the west
        let moved = viewport.pan(Point::new(100.0, 0.0));

        assert!(viewport.center.lng < before.lng);
        assert!((viewport.center.lat - before.lat).abs() < 1e-9);
        assert!((moved.x + 100.0).abs() < 1e-6);
        assert!(moved.y.abs() < 1e-6);
    }

    #[test]
    fn test_zoom_to_keeps_focus_point_fixed() {
        let mut viewport = campus_viewport();
        let focus = Point::new(600.0, 150.0);
        let under_cursor = viewport.pixel_to_lat_lng(&focus);

        viewport.zoom_to(18.0, Some(focus));

        let after = viewport.lat_lng_to_pixel(&under_cursor);
        assert_eq!(viewport.zoom, 18.0);
        assert!(after.distance_to(&focus) < 1e-3);
    }

    #[test]
    fn test_resolution_halves_per_zoom_level() {
        let mut viewport = campus_viewport();
        let at_17 = viewport.resolution();
        viewport.set_zoom(18.0);

        assert!((at_17 / viewport.resolution() - 2.0).abs() < 1e-9);
        // zoom 0 shows the whole world on one 256 px tile
        assert!((Viewport::default().resolution() * 256.0 - WORLD_EXTENT).abs() < 1e-6);
    }

    #[test]
    fn test_project_matches_tile_grid() {
        let viewport = campus_viewport();
        let campus = viewport.center;
        let world_px = viewport.project(&campus, Some(17.0));
        let tile = TileCoord::from_lat_lng(&campus, 17);

        assert_eq!((world_px.x / 256.0).floor() as u32, tile.x);
        assert_eq!((world_px.y / 256.0).floor() as u32, tile.y);

        let back = viewport.unproject(&world_px, Some(17.0));
        assert!((back.lat - campus.lat).abs() < 1e-9);
        assert!((back.lng - campus.lng).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_cover_the_container() {
        let viewport = campus_viewport();
        let bounds = viewport.bounds();

        assert!(bounds.contains(&viewport.center));
        assert!(bounds.contains(&viewport.pixel_to_lat_lng(&Point::new(799.0, 1.0))));
        assert!(!bounds.contains(&viewport.pixel_to_lat_lng(&Point::new(820.0, 300.0))));
    }
}
