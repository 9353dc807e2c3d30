//! OpenStreetMap implementation of the MapRenderer port.
//!
//! Each mounted widget holds a lease on the shared `MapRegistry`; the lease
//! is returned when the widget is dropped. Initialisation failures release the
//! lease before the error propagates.

use crate::domain::DomainError;
use crate::ports::{MapRenderer, MapWidget};
use std::f64::consts::PI;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Attribution required by the OSM tile usage policy.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

/// Web Mercator latitude limit.
const MAX_LATITUDE: f64 = 85.051_128_78;

const GRID_COLS: usize = 21;
const GRID_ROWS: usize = 7;

/// Counts live map widgets so leaks are observable.
#[derive(Debug, Default)]
pub struct MapRegistry {
    live: AtomicUsize,
    mounted: AtomicUsize,
}

impl MapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widgets currently mounted.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// Widgets ever mounted, including released ones.
    pub fn mounted_total(&self) -> usize {
        self.mounted.load(Ordering::SeqCst)
    }

    fn acquire(self: &Arc<Self>) -> MapLease {
        self.live.fetch_add(1, Ordering::SeqCst);
        self.mounted.fetch_add(1, Ordering::SeqCst);
        MapLease {
            registry: Arc::clone(self),
        }
    }
}

/// Released on drop.
struct MapLease {
    registry: Arc<MapRegistry>,
}

impl Drop for MapLease {
    fn drop(&mut self) {
        self.registry.live.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Slippy-map tile position: tile indices plus the fractional offset inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePosition {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
    /// 0.0..1.0 from the tile's left edge.
    pub offset_x: f64,
    /// 0.0..1.0 from the tile's top edge.
    pub offset_y: f64,
}

impl TilePosition {
    /// Standard OSM tile numbering for `(latitude, longitude)` at `zoom`.
    pub fn locate(latitude: f64, longitude: f64, zoom: u8) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(DomainError::Map("coordinates are not finite".into()));
        }
        if latitude.abs() > MAX_LATITUDE {
            return Err(DomainError::Map(format!(
                "latitude {} outside the map projection",
                latitude
            )));
        }
        if longitude.abs() > 180.0 {
            return Err(DomainError::Map(format!(
                "longitude {} out of range",
                longitude
            )));
        }

        let n = f64::from(1u32 << zoom);
        let lat_rad = latitude.to_radians();
        let fx = (longitude + 180.0) / 360.0 * n;
        let fy = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n;

        let max_index = n - 1.0;
        let tx = fx.floor().clamp(0.0, max_index);
        let ty = fy.floor().clamp(0.0, max_index);

        Ok(Self {
            zoom,
            x: tx as u32,
            y: ty as u32,
            offset_x: (fx - tx).clamp(0.0, 1.0),
            offset_y: (fy - ty).clamp(0.0, 1.0),
        })
    }

    pub fn tile_url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.zoom.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }
}

/// OpenStreetMap-backed renderer.
pub struct OsmMapRenderer {
    zoom: u8,
    tile_url: String,
    registry: Arc<MapRegistry>,
}

impl OsmMapRenderer {
    pub fn new(zoom: u8, tile_url: String, registry: Arc<MapRegistry>) -> Self {
        Self {
            zoom,
            tile_url,
            registry,
        }
    }

    pub fn registry(&self) -> &Arc<MapRegistry> {
        &self.registry
    }
}

impl MapRenderer for OsmMapRenderer {
    fn mount(&self, latitude: f64, longitude: f64) -> Result<Box<dyn MapWidget>, DomainError> {
        let lease = self.registry.acquire();
        // On error `lease` drops here and the slot is returned.
        let tile = TilePosition::locate(latitude, longitude, self.zoom)?;
        debug!(
            latitude,
            longitude,
            zoom = tile.zoom,
            x = tile.x,
            y = tile.y,
            "map mounted"
        );
        Ok(Box::new(OsmTileMap {
            _lease: lease,
            latitude,
            longitude,
            tile_url: tile.tile_url(&self.tile_url),
            tile,
        }))
    }
}

/// One mounted map: a marker grid over the containing tile plus links.
struct OsmTileMap {
    _lease: MapLease,
    latitude: f64,
    longitude: f64,
    tile: TilePosition,
    tile_url: String,
}

impl OsmTileMap {
    fn marker_cell(&self) -> (usize, usize) {
        let col = ((self.tile.offset_x * GRID_COLS as f64) as usize).min(GRID_COLS - 1);
        let row = ((self.tile.offset_y * GRID_ROWS as f64) as usize).min(GRID_ROWS - 1);
        (row, col)
    }

    fn permalink(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat:.5}&mlon={lon:.5}#map={z}/{lat:.5}/{lon:.5}",
            lat = self.latitude,
            lon = self.longitude,
            z = self.tile.zoom
        )
    }
}

/// `12.93520°N, 77.62450°E`
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    let ns = if latitude < 0.0 { 'S' } else { 'N' };
    let ew = if longitude < 0.0 { 'W' } else { 'E' };
    format!(
        "{:.5}°{}, {:.5}°{}",
        latitude.abs(),
        ns,
        longitude.abs(),
        ew
    )
}

impl MapWidget for OsmTileMap {
    fn center(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }

    fn render(&self) -> Vec<String> {
        let (marker_row, marker_col) = self.marker_cell();
        let mut lines = Vec::with_capacity(GRID_ROWS + 6);
        lines.push(format!("┌{}┐", "─".repeat(GRID_COLS)));
        for row in 0..GRID_ROWS {
            let cells: String = (0..GRID_COLS)
                .map(|col| {
                    if row == marker_row && col == marker_col {
                        '◉'
                    } else {
                        '·'
                    }
                })
                .collect();
            lines.push(format!("│{}│", cells));
        }
        lines.push(format!("└{}┘", "─".repeat(GRID_COLS)));
        lines.push(format_coordinates(self.latitude, self.longitude));
        lines.push(self.permalink());
        lines.push(format!("Tile: {}", self.tile_url));
        lines.push(OSM_ATTRIBUTION.to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::DEFAULT_TILE_URL;

    fn renderer() -> OsmMapRenderer {
        OsmMapRenderer::new(15, DEFAULT_TILE_URL.to_string(), Arc::new(MapRegistry::new()))
    }

    #[test]
    fn test_locate_known_tiles() {
        let origin = TilePosition::locate(0.0, 0.0, 1).unwrap();
        assert_eq!((origin.x, origin.y), (1, 1));

        // London at zoom 10.
        let london = TilePosition::locate(51.5074, -0.1278, 10).unwrap();
        assert_eq!((london.x, london.y), (511, 340));

        let edge = TilePosition::locate(0.0, 180.0, 2).unwrap();
        assert_eq!(edge.x, 3);
    }

    #[test]
    fn test_locate_rejects_bad_coordinates() {
        assert!(TilePosition::locate(f64::NAN, 0.0, 15).is_err());
        assert!(TilePosition::locate(89.0, 0.0, 15).is_err());
        assert!(TilePosition::locate(0.0, 181.0, 15).is_err());
    }

    #[test]
    fn test_tile_url_template() {
        let tile = TilePosition::locate(0.0, 0.0, 1).unwrap();
        assert_eq!(
            tile.tile_url(DEFAULT_TILE_URL),
            "https://tile.openstreetmap.org/1/1/1.png"
        );
    }

    #[test]
    fn test_mount_and_drop_releases() {
        let r = renderer();
        let a = r.mount(12.9352, 77.6245).unwrap();
        let b = r.mount(12.9116, 77.6389).unwrap();
        assert_eq!(r.registry().live(), 2);
        assert_eq!(a.center(), (12.9352, 77.6245));
        drop(a);
        assert_eq!(r.registry().live(), 1);
        drop(b);
        assert_eq!(r.registry().live(), 0);
        assert_eq!(r.registry().mounted_total(), 2);
    }

    #[test]
    fn test_failed_mount_leaves_nothing_live() {
        let r = renderer();
        assert!(r.mount(f64::INFINITY, 77.0).is_err());
        assert_eq!(r.registry().live(), 0);
        assert_eq!(r.registry().mounted_total(), 1);
    }

    #[test]
    fn test_render_single_marker_and_attribution() {
        let r = renderer();
        let map = r.mount(12.9352, 77.6245).unwrap();
        let lines = map.render();
        let markers: usize = lines.iter().map(|l| l.matches('◉').count()).sum();
        assert_eq!(markers, 1);
        assert!(lines.contains(&OSM_ATTRIBUTION.to_string()));
        assert!(lines.iter().any(|l| l == "12.93520°N, 77.62450°E"));
        assert!(lines.iter().any(|l| l.contains("mlat=12.93520&mlon=77.62450#map=15/")));
    }

    #[test]
    fn test_format_coordinates_hemispheres() {
        assert_eq!(format_coordinates(-33.8688, -151.2093), "33.86880°S, 151.20930°W");
    }
}
