//! Transient hover/selection state of one rendered map and the route styles and
//! sidebar content derived from it.

use std::fmt;

use log::debug;

use crate::data::{route::RouteId, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub struct PaletteEntry {
    pub route: RouteId,
    pub color: Rgb,
}

/// Fixed styling rules. Routes missing from `palette` use `default_color`.
pub struct StyleConfig {
    pub highlight_color: Rgb,
    pub palette: &'static [PaletteEntry],
    pub default_color: Rgb,
    pub weight: f32,
    pub selected_weight: f32,
    pub dimmed_opacity: f32,
    pub dash_array: &'static [f32],
}

impl StyleConfig {
    pub const DEFAULT: StyleConfig = StyleConfig {
        highlight_color: Rgb(0xff, 0x00, 0x00),
        palette: &[
            PaletteEntry { route: RouteId(1), color: Rgb(0xe5, 0x39, 0x35) },
            PaletteEntry { route: RouteId(2), color: Rgb(0x1e, 0x88, 0xe5) },
            PaletteEntry { route: RouteId(3), color: Rgb(0x43, 0xa0, 0x47) },
            PaletteEntry { route: RouteId(4), color: Rgb(0xfb, 0x8c, 0x00) },
        ],
        default_color: Rgb(0x9c, 0x27, 0xb0),
        weight: 3.0,
        selected_weight: 4.0,
        dimmed_opacity: 0.3,
        dash_array: &[5.0, 10.0],
    };

    pub fn route_color(&self, route: RouteId) -> Rgb {
        self.palette.iter()
            .find(|entry| entry.route == route)
            .map(|entry| entry.color)
            .unwrap_or(self.default_color)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStyle {
    pub color: Rgb,
    pub weight: f32,
    pub opacity: f32,
    /// Empty for a solid line.
    pub dash_array: Vec<f32>,
}

pub struct SelectionController {
    style: &'static StyleConfig,
    hovered_route: Option<RouteId>,
    selected_route: Option<RouteId>,
    active_station: Option<String>,
}

impl SelectionController {
    pub fn new(style: &'static StyleConfig) -> SelectionController {
        SelectionController {
            style,
            hovered_route: None,
            selected_route: None,
            active_station: None,
        }
    }

    pub fn hovered_route(&self) -> Option<RouteId> {
        self.hovered_route
    }

    pub fn selected_route(&self) -> Option<RouteId> {
        self.selected_route
    }

    pub fn active_station(&self) -> Option<&str> {
        self.active_station.as_deref()
    }

    pub fn on_route_hover(&mut self, route: Option<RouteId>) {
        self.hovered_route = route;
    }

    pub fn on_route_click(&mut self, route: RouteId) {
        if self.selected_route == Some(route) {
            debug!(route_id = route.0; "Route deselected");
            self.selected_route = None;
        } else {
            debug!(route_id = route.0; "Route selected");
            self.selected_route = Some(route);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_route = None;
    }

    /// Opens the detail popup of a station, or closes it if it is already open.
    pub fn on_station_click(&mut self, station: &str) {
        if self.active_station.as_deref() == Some(station) {
            self.active_station = None;
        } else {
            self.active_station = Some(station.to_string());
        }
    }

    pub fn derive_route_style(&self, route: RouteId) -> RouteStyle {
        let style = self.style;
        match self.selected_route {
            Some(selected) if selected == route => RouteStyle {
                color: style.highlight_color,
                weight: style.selected_weight,
                opacity: 1.0,
                dash_array: style.dash_array.to_vec(),
            },
            selected => RouteStyle {
                color: style.route_color(route),
                weight: style.weight,
                opacity: if selected.is_some() { style.dimmed_opacity } else { 1.0 },
                dash_array: Vec::new(),
            },
        }
    }

    pub fn overlay(&self, registry: &Registry) -> Overlay {
        let panel = |id: Option<RouteId>| {
            id.and_then(|id| registry.route(id)).map(|route| RoutePanel {
                name: route.name.clone(),
                stations: route.stations.clone(),
            })
        };
        Overlay {
            hovered: panel(self.hovered_route()),
            selected: panel(self.selected_route()),
            legend: registry.routes()
                .map(|route| LegendEntry {
                    route: route.id,
                    name: route.name.clone(),
                    color: self.style.route_color(route.id),
                })
                .collect(),
            show_all_routes: self.selected_route.is_some(),
        }
    }
}

pub struct RoutePanel {
    pub name: String,
    pub stations: Vec<String>,
}

pub struct LegendEntry {
    pub route: RouteId,
    pub name: String,
    pub color: Rgb,
}

/// Sidebar next to the map.
pub struct Overlay {
    pub hovered: Option<RoutePanel>,
    pub selected: Option<RoutePanel>,
    pub legend: Vec<LegendEntry>,
    pub show_all_routes: bool,
}

impl Overlay {
    pub const TITLE: &'static str = "湛江市铁路交通地图";
    pub const SUBTITLE: &'static str = "广东省湛江市铁路网络";
    pub const HEADING: &'static str = "主要铁路线路";
    pub const DESCRIPTION: &'static str =
        "湛江市是粤西地区重要的铁路交通枢纽，连接粤港澳大湾区和海南自贸港。";
    pub const HINT: &'static str = "提示：点击站点可查看详细信息";
    pub const SELECTED_KEY: &'static str = "已选路线";
    pub const STATION_KEY: &'static str = "车站";
    pub const FOOTNOTE: &'static str =
        "注: 站点位置为实际位置。连线表示站点之间的连接关系，不一定完全符合实际铁路线路走向。";
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", Self::TITLE)?;
        writeln!(f, "{}", Self::SUBTITLE)?;
        writeln!(f)?;
        writeln!(f, "{}", Self::HEADING)?;
        writeln!(f, "{}", Self::DESCRIPTION)?;
        writeln!(f, "{}", Self::HINT)?;
        if let Some(hovered) = &self.hovered {
            writeln!(f)?;
            writeln!(f, "路线: {}", hovered.name)?;
            writeln!(f, "站点: {}", hovered.stations.join(", "))?;
        }
        if let Some(selected) = &self.selected {
            writeln!(f)?;
            writeln!(f, "已选路线: {}", selected.name)?;
            writeln!(f, "站点:")?;
            for station in &selected.stations {
                writeln!(f, "  {}", station)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "图例")?;
        if self.show_all_routes {
            writeln!(f, "[显示所有路线]")?;
        }
        for entry in &self.legend {
            writeln!(f, "  {} {} {}", entry.route, entry.color, entry.name)?;
        }
        // dashed highlight line and the square station marker
        writeln!(f, "  - - {}", Self::SELECTED_KEY)?;
        writeln!(f, "  ■ {}", Self::STATION_KEY)?;
        writeln!(f)?;
        writeln!(f, "{}", Self::FOOTNOTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ZHANJIANG;

    fn controller() -> SelectionController {
        SelectionController::new(&StyleConfig::DEFAULT)
    }

    #[test]
    fn starts_idle() {
        let c = controller();
        assert_eq!(c.hovered_route(), None);
        assert_eq!(c.selected_route(), None);
        assert_eq!(c.active_station(), None);
    }

    #[test]
    fn full_opacity_when_nothing_selected() {
        let c = controller();
        for id in 1..=8 {
            let style = c.derive_route_style(RouteId(id));
            assert_eq!(style.opacity, 1.0);
            assert_eq!(style.weight, 3.0);
            assert!(style.dash_array.is_empty());
        }
    }

    #[test]
    fn palette_falls_back_to_default() {
        let c = controller();
        assert_eq!(c.derive_route_style(RouteId(1)).color, Rgb(0xe5, 0x39, 0x35));
        assert_eq!(c.derive_route_style(RouteId(4)).color, Rgb(0xfb, 0x8c, 0x00));
        assert_eq!(c.derive_route_style(RouteId(5)).color, Rgb(0x9c, 0x27, 0xb0));
        assert_eq!(c.derive_route_style(RouteId(42)).color, Rgb(0x9c, 0x27, 0xb0));
    }

    #[test]
    fn selected_route_is_highlighted() {
        let mut c = controller();
        c.on_route_click(RouteId(2));
        let style = c.derive_route_style(RouteId(2));
        assert_eq!(style, RouteStyle {
            color: Rgb(0xff, 0x00, 0x00),
            weight: 4.0,
            opacity: 1.0,
            dash_array: vec![5.0, 10.0],
        });
    }

    #[test]
    fn other_routes_dim_while_one_is_selected() {
        let mut c = controller();
        c.on_route_click(RouteId(2));
        let style = c.derive_route_style(RouteId(3));
        assert_eq!(style.opacity, 0.3);
        assert_eq!(style.color, Rgb(0x43, 0xa0, 0x47));
        assert_eq!(style.weight, 3.0);
        assert!(style.dash_array.is_empty());
    }

    #[test]
    fn derivation_is_repeatable() {
        let mut c = controller();
        c.on_route_click(RouteId(1));
        for id in 1..=5 {
            assert_eq!(c.derive_route_style(RouteId(id)), c.derive_route_style(RouteId(id)));
        }
        assert_eq!(c.selected_route(), Some(RouteId(1)));
    }

    #[test]
    fn click_toggles_selection() {
        let mut c = controller();
        c.on_route_click(RouteId(3));
        assert_eq!(c.selected_route(), Some(RouteId(3)));
        c.on_route_click(RouteId(3));
        assert_eq!(c.selected_route(), None);
        c.on_route_click(RouteId(3));
        c.on_route_click(RouteId(5));
        assert_eq!(c.selected_route(), Some(RouteId(5)));
    }

    #[test]
    fn hover_and_selection_are_independent() {
        let mut c = controller();
        c.on_route_hover(Some(RouteId(2)));
        c.on_route_click(RouteId(7));
        assert_eq!(c.hovered_route(), Some(RouteId(2)));
        assert_eq!(c.selected_route(), Some(RouteId(7)));
        c.on_route_hover(None);
        assert_eq!(c.hovered_route(), None);
        assert_eq!(c.selected_route(), Some(RouteId(7)));
        c.on_route_click(RouteId(7));
        c.on_route_hover(Some(RouteId(4)));
        assert_eq!(c.selected_route(), None);
        assert_eq!(c.hovered_route(), Some(RouteId(4)));
    }

    #[test]
    fn clear_selection_keeps_hover() {
        let mut c = controller();
        c.on_route_hover(Some(RouteId(1)));
        c.on_route_click(RouteId(1));
        c.clear_selection();
        assert_eq!(c.selected_route(), None);
        assert_eq!(c.hovered_route(), Some(RouteId(1)));
    }

    #[test]
    fn station_click_toggles_popup() {
        let mut c = controller();
        c.on_station_click("湛江站");
        assert_eq!(c.active_station(), Some("湛江站"));
        c.on_station_click("徐闻站");
        assert_eq!(c.active_station(), Some("徐闻站"));
        c.on_station_click("徐闻站");
        assert_eq!(c.active_station(), None);
    }

    #[test]
    fn overlay_follows_state() {
        let mut c = controller();
        let idle = c.overlay(&ZHANJIANG);
        assert!(idle.hovered.is_none());
        assert!(idle.selected.is_none());
        assert!(!idle.show_all_routes);
        assert_eq!(idle.legend.len(), 5);
        assert_eq!(idle.legend[4].color, Rgb(0x9c, 0x27, 0xb0));

        c.on_route_hover(Some(RouteId(1)));
        c.on_route_click(RouteId(2));
        let overlay = c.overlay(&ZHANJIANG);
        assert_eq!(overlay.hovered.as_ref().unwrap().name, "黎湛铁路");
        assert_eq!(overlay.selected.as_ref().unwrap().name, "粤海铁路");
        assert!(overlay.show_all_routes);

        let text = overlay.to_string();
        assert!(text.contains("路线: 黎湛铁路"));
        assert!(text.contains("站点: 河唇站, 廉江站, 遂溪站, 湛江站"));
        assert!(text.contains("已选路线: 粤海铁路"));
        assert!(text.contains("[显示所有路线]"));
        assert!(text.contains("#1e88e5 粤海铁路"));
    }

    #[test]
    fn overlay_text_carries_static_sidebar() {
        let text = controller().overlay(&ZHANJIANG).to_string();
        let heading = text.find("主要铁路线路").unwrap();
        let description = text.find("湛江市是粤西地区重要的铁路交通枢纽").unwrap();
        let legend = text.find("图例").unwrap();
        let selected_key = text.find("- - 已选路线").unwrap();
        let station_key = text.find("■ 车站").unwrap();
        assert!(heading < description && description < legend);
        assert!(legend < selected_key && selected_key < station_key);
        assert!(text.find("河茂铁路").unwrap() < selected_key);
    }

    #[test]
    fn overlay_skips_unknown_routes() {
        let mut c = controller();
        c.on_route_click(RouteId(9));
        let overlay = c.overlay(&ZHANJIANG);
        assert!(overlay.selected.is_none());
        assert!(overlay.show_all_routes);
    }
}
