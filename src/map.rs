use log::{debug, error, info};
use serde::Deserialize;

use crate::{
    data::{route::{Route, RouteId}, station::Coordinate, Registry},
    errors::Result,
    selection::{Overlay, SelectionController, StyleConfig},
    surface::{Marker, MarkerIcon, Polyline, RenderSurface, StationPopup, TileLayer},
};

pub const LOADING_MESSAGE: &str = "加载地图中...";
pub const LOAD_FAILED_MESSAGE: &str = "地图加载失败，请刷新页面重试";
pub const MISSING_DETAIL: &str = "暂无信息";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionEvent {
    RouteEnter { route: RouteId },
    RouteLeave { route: RouteId },
    RouteClick { route: RouteId },
    StationClick { station: String },
    ShowAllRoutes,
}

enum SurfaceState<S> {
    Loading,
    Ready(S),
    Failed(String),
}

/// One rendered map. The drawing surface is acquired once; until then the view
/// shows a placeholder and ignores interaction.
pub struct RailMapView<'r, S> {
    registry: &'r Registry,
    controller: SelectionController,
    surface: SurfaceState<S>,
    tile_url: String,
    attribution: String,
}

impl<'r, S: RenderSurface> RailMapView<'r, S> {
    pub fn new(registry: &'r Registry, style: &'static StyleConfig, tile_url: &str, attribution: &str) -> Self {
        RailMapView {
            registry,
            controller: SelectionController::new(style),
            surface: SurfaceState::Loading,
            tile_url: tile_url.to_string(),
            attribution: attribution.to_string(),
        }
    }

    pub fn resolve_surface(&mut self, surface: Result<S>) {
        if !matches!(self.surface, SurfaceState::Loading) {
            debug!("Surface already resolved, ignoring");
            return;
        }
        self.surface = match surface {
            Ok(surface) => {
                info!("Rendering surface ready");
                SurfaceState::Ready(surface)
            },
            Err(err) => {
                error!(err = err.message.as_str(); "Rendering surface failed to load");
                SurfaceState::Failed(LOAD_FAILED_MESSAGE.to_string())
            },
        };
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.surface, SurfaceState::Ready(_))
    }

    /// What to show instead of the map, if it cannot be drawn.
    pub fn placeholder(&self) -> Option<&str> {
        match &self.surface {
            SurfaceState::Loading => Some(LOADING_MESSAGE),
            SurfaceState::Ready(_) => None,
            SurfaceState::Failed(message) => Some(message.as_str()),
        }
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn into_surface(self) -> Option<S> {
        match self.surface {
            SurfaceState::Ready(surface) => Some(surface),
            _ => None,
        }
    }

    /// Returns false when the event was dropped because the map is not ready.
    pub fn handle(&mut self, event: &InteractionEvent) -> bool {
        if !self.is_ready() {
            debug!("Map not ready, dropping interaction");
            return false;
        }
        match event {
            InteractionEvent::RouteEnter { route } => self.controller.on_route_hover(Some(*route)),
            InteractionEvent::RouteLeave { route } => {
                debug!(route_id = route.0; "Pointer left route");
                self.controller.on_route_hover(None)
            },
            InteractionEvent::RouteClick { route } => self.controller.on_route_click(*route),
            InteractionEvent::StationClick { station } => self.controller.on_station_click(station),
            InteractionEvent::ShowAllRoutes => self.controller.clear_selection(),
        }
        true
    }

    pub fn overlay(&self) -> Overlay {
        self.controller.overlay(self.registry)
    }

    fn resolve_path(&self, route: &Route) -> Vec<Coordinate> {
        route.path.iter()
            .filter_map(|name| {
                let coordinate = self.registry.lookup_coordinate(name);
                if coordinate.is_none() {
                    debug!(route_id = route.id.0, station = name.as_str(); "Station not in registry, skipping");
                }
                coordinate
            })
            .collect()
    }

    /// Draws everything onto the surface. Does nothing while there is no surface.
    pub fn render(&mut self) -> Result<()> {
        let polylines: Vec<Polyline> = self.registry.routes()
            .map(|route| Polyline {
                route: route.id,
                coordinates: self.resolve_path(route),
                style: self.controller.derive_route_style(route.id),
            })
            .collect();
        let registry = self.registry;
        let active_station = self.controller.active_station();
        let markers: Vec<Marker> = registry.stations()
            .map(|station| Marker {
                coordinate: station.coordinate,
                icon: &MarkerIcon::STATION,
                label: station.label(),
                popup: StationPopup {
                    title: station.name.clone(),
                    address: station.address.clone().unwrap_or_else(|| MISSING_DETAIL.to_string()),
                    phone: station.phone.clone().unwrap_or_else(|| MISSING_DETAIL.to_string()),
                    coordinates: format!("{},{}", station.coordinate.lon, station.coordinate.lat),
                },
                popup_open: active_station == Some(station.name.as_str()),
            })
            .collect();

        let SurfaceState::Ready(surface) = &mut self.surface else {
            return Ok(());
        };
        surface.draw_tile_layer(&TileLayer {
            url: &self.tile_url,
            attribution: &self.attribution,
        })?;
        for polyline in &polylines {
            surface.draw_polyline(polyline)?;
        }
        for marker in &markers {
            surface.draw_marker(marker)?;
        }
        Ok(())
    }
}
