use crate::{
    data::{route::RouteId, station::Coordinate},
    errors::Result,
    selection::{RouteStyle, Rgb},
};

pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str = "© OpenStreetMap contributors";

pub struct TileLayer<'a> {
    pub url: &'a str,
    pub attribution: &'a str,
}

/// A route line. Pointer enter/leave/click over it come back as
/// `InteractionEvent`s carrying `route`.
pub struct Polyline {
    pub route: RouteId,
    pub coordinates: Vec<Coordinate>,
    pub style: RouteStyle,
}

pub struct MarkerIcon {
    pub size: f32,
    pub color: Rgb,
}

impl MarkerIcon {
    pub const STATION: MarkerIcon = MarkerIcon {
        size: 10.0,
        color: Rgb(0xff, 0x00, 0x00),
    };
}

pub struct StationPopup {
    pub title: String,
    pub address: String,
    pub phone: String,
    pub coordinates: String,
}

pub struct Marker<'a> {
    pub coordinate: Coordinate,
    pub icon: &'a MarkerIcon,
    /// Always visible, above the icon.
    pub label: String,
    pub popup: StationPopup,
    pub popup_open: bool,
}

/// Something that can draw the map: a base layer, route lines and station markers.
pub trait RenderSurface {
    fn draw_tile_layer(&mut self, layer: &TileLayer) -> Result<()>;
    fn draw_polyline(&mut self, polyline: &Polyline) -> Result<()>;
    fn draw_marker(&mut self, marker: &Marker) -> Result<()>;
}
