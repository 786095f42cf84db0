use std::{borrow::Cow, fs::{self, File}, path::{Path, PathBuf}};

use log::{debug, info, warn};
use raqote::{DrawOptions, DrawTarget, LineCap, LineJoin, PathBuilder, Point, SolidSource, Source, StrokeStyle};
use serde::Deserialize;

use crate::{
    data::{station::Coordinate, Registry, ZHANJIANG},
    errors::Result,
    map::RailMapView,
    selection::{Rgb, StyleConfig},
    surface::{Marker, Polyline, RenderSurface, TileLayer},
    UserConfig,
};

use super::Etl;

mod fk {
    pub use font_kit::font::Font;
    pub use pathfinder_geometry::vector::vec2f;
}

pub const ETL_NAME: &str = "draw_map";
pub const OUTPUT_FILE_NAME: &str = "output.png";
pub const OVERLAY_FILE_NAME: &str = "overlay.txt";

const LABEL_POINT_SIZE: f32 = 14.0;
const POPUP_POINT_SIZE: f32 = 12.0;
const POPUP_WIDTH: f32 = 260.0;
const POPUP_LINE_HEIGHT: f32 = 18.0;

use serialize_color::deserialize;

#[derive(Deserialize)]
pub struct Theme {
    #[serde(deserialize_with = "deserialize")]
    pub background_color: SolidSource,

    #[serde(deserialize_with = "deserialize")]
    pub text_color: SolidSource,

    #[serde(deserialize_with = "deserialize")]
    pub popup_color: SolidSource,
}

mod serialize_color {
    use raqote::SolidSource;
    use serde::{de, Deserializer};
    use serde::de::Visitor;


    struct ColorVisitor;

    impl<'de> Visitor<'de> for ColorVisitor {
        type Value = SolidSource;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(formatter, "a colour written as '#rrggbb' or '#rrggbbaa'")
        }

        fn visit_str<E>(self, string: &str) -> Result<Self::Value, E> where E: de::Error {
            if !string.is_ascii() || !string.starts_with('#') || (string.len() != 7 && string.len() != 9) {
                return Err(de::Error::invalid_value(de::Unexpected::Str(string), &self))
            }
            let r = parse_hex_byte(&self, &string[1..3])?;
            let g = parse_hex_byte(&self, &string[3..5])?;
            let b = parse_hex_byte(&self, &string[5..7])?;
            let a = if string.len() == 9 {
                parse_hex_byte(&self, &string[7..9])?
            } else {
                0xff
            };
            Ok(SolidSource::from_unpremultiplied_argb(a, r, g, b))
        }
    }

    fn parse_hex_byte<E>(visitor: &ColorVisitor, string: &str) -> Result<u8, E> where E: de::Error {
        u8::from_str_radix(string, 16).map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Str(string), visitor)
        })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SolidSource, D::Error>
        where D: Deserializer<'de> {
        deserializer.deserialize_str(ColorVisitor)
    }
}

fn solid(color: Rgb) -> Source<'static> {
    Source::Solid(SolidSource::from_unpremultiplied_argb(0xff, color.0, color.1, color.2))
}

/// Draws the map into an in-memory raqote canvas.
pub struct RaqoteSurface<'a> {
    user_config: &'a UserConfig,
    theme: &'a Theme,
    font: Option<fk::Font>,
    dt: DrawTarget,
}

impl<'a> RaqoteSurface<'a> {
    /// Fails if the canvas size is out of range or the configured font cannot be read.
    pub fn acquire(user_config: &'a UserConfig) -> Result<RaqoteSurface<'a>> {
        let font = match &user_config.font_path {
            Some(path) => Some(fk::Font::from_path(path, 0)?),
            None => {
                warn!("No font configured, station labels will not be drawn");
                None
            },
        };
        let dt = DrawTarget::new(
            user_config.width_px.try_into()?,
            user_config.height_px.try_into()?,
        );
        Ok(RaqoteSurface {
            user_config,
            theme: &user_config.theme,
            font,
            dt,
        })
    }

    pub fn into_draw_target(self) -> DrawTarget {
        self.dt
    }

    fn project(&self, coords: &Coordinate) -> (f32, f32) {
        let rel_lon = coords.lon - self.user_config.top_left_lon;
        let rel_lat = coords.lat - self.user_config.top_left_lat;

        let x = rel_lon * self.user_config.px_per_deg_lon;
        let y = - rel_lat * self.user_config.px_per_deg_lat;
        (x as f32, y as f32)
    }

    /// Horizontally centred on `x`, baseline at `y`.
    fn draw_text(&mut self, x: f32, y: f32, point_size: f32, text: &str) -> Result<()> {
        let Some(font) = &self.font else {
            return Ok(());
        };
        let mut start = fk::vec2f(x, y);
        let mut ids = Vec::new();
        let mut positions = Vec::new();
        for c in text.chars() {
            let Some(id) = font.glyph_for_char(c) else {
                continue;
            };
            ids.push(id);
            positions.push(Point::new(start.x(), start.y()));
            start += font.advance(id)? * point_size / 24. / 96. * 2.0;
        }
        let Some(last) = positions.last() else {
            return Ok(());
        };
        let total_width: f32 = last.x - x + point_size / 2.0;
        for position in &mut positions {
            position.x -= total_width * 0.5;
        }
        let source = Source::Solid(self.theme.text_color);
        self.dt.draw_glyphs(font, point_size, &ids, &positions, &source, &DrawOptions::new());
        Ok(())
    }

    fn draw_popup(&mut self, x_center: f32, top: f32, marker: &Marker) -> Result<()> {
        let lines = [
            marker.popup.title.clone(),
            format!("地址：{}", marker.popup.address),
            format!("电话：{}", marker.popup.phone),
            format!("坐标：{}", marker.popup.coordinates),
        ];
        let height = POPUP_LINE_HEIGHT * lines.len() as f32 + 8.0;
        self.dt.fill_rect(
            x_center - POPUP_WIDTH / 2.0,
            top,
            POPUP_WIDTH,
            height,
            &Source::Solid(self.theme.popup_color),
            &DrawOptions::new(),
        );
        for (idx, line) in lines.iter().enumerate() {
            let baseline = top + POPUP_LINE_HEIGHT * (idx + 1) as f32;
            self.draw_text(x_center, baseline, POPUP_POINT_SIZE, line)?;
        }
        Ok(())
    }
}

impl RenderSurface for RaqoteSurface<'_> {
    fn draw_tile_layer(&mut self, layer: &TileLayer) -> Result<()> {
        info!(tile_url = layer.url; "Drawing base layer");
        self.dt.clear(self.theme.background_color);
        let x = self.dt.width() as f32 / 2.0;
        let y = self.dt.height() as f32 - 6.0;
        self.draw_text(x, y, 10.0, layer.attribution)
    }

    fn draw_polyline(&mut self, polyline: &Polyline) -> Result<()> {
        let coordinates = &polyline.coordinates;
        if coordinates.len() < 2 {
            debug!(route_id = polyline.route.0; "Too few resolved stations to draw route");
            return Ok(());
        }
        let mut pb = PathBuilder::new();
        let (x0, y0) = self.project(&coordinates[0]);
        pb.move_to(x0, y0);

        for coords in &coordinates[1..] {
            let (x, y) = self.project(coords);
            pb.line_to(x, y);
        }
        let raqote_path = pb.finish();

        let mut draw_options = DrawOptions::new();
        draw_options.alpha = polyline.style.opacity;

        self.dt.stroke(
            &raqote_path,
            &solid(polyline.style.color),
            &StrokeStyle {
                cap: LineCap::Round,
                join: LineJoin::Round,
                width: polyline.style.weight,
                miter_limit: 2.0,
                dash_array: polyline.style.dash_array.clone(),
                dash_offset: 0.0,
            },
            &draw_options,
        );
        Ok(())
    }

    fn draw_marker(&mut self, marker: &Marker) -> Result<()> {
        let (x_center, y_center) = self.project(&marker.coordinate);
        let size = marker.icon.size;

        self.dt.fill_rect(
            x_center - size / 2.0,
            y_center - size / 2.0,
            size,
            size,
            &solid(marker.icon.color),
            &DrawOptions::new(),
        );

        self.draw_text(x_center, y_center - size / 2.0 - 5.0, LABEL_POINT_SIZE, &marker.label)?;
        if marker.popup_open {
            self.draw_popup(x_center, y_center + size / 2.0 + 5.0, marker)?;
        }
        Ok(())
    }
}

pub struct RenderedMap {
    pub target: DrawTarget,
    pub overlay: String,
}

/// Draws the network in the state reached by replaying the configured interactions.
pub struct DrawMapEtl<'a> {
    user_config: &'a UserConfig,
}

impl DrawMapEtl<'_> {
    fn output_path(dir: &Path) -> PathBuf {
        dir.join(OUTPUT_FILE_NAME)
    }

    fn overlay_path(dir: &Path) -> PathBuf {
        dir.join(OVERLAY_FILE_NAME)
    }

    pub fn new(user_config: &UserConfig) -> DrawMapEtl<'_> {
        DrawMapEtl {
            user_config,
        }
    }
}

impl Etl for DrawMapEtl<'_> {
    type Input = Cow<'static, Registry>;

    type Output = RenderedMap;

    fn etl_name(&self) -> &str {
        ETL_NAME
    }

    fn output_paths(&self, dir: &Path) -> Vec<PathBuf> {
        vec![Self::output_path(dir), Self::overlay_path(dir)]
    }

    fn extract(&mut self, _dir: &Path) -> Result<Self::Input> {
        match &self.user_config.network_path {
            Some(path) => {
                info!(network_path = path.as_str(); "Loading network file");
                Ok(Cow::Owned(Registry::from_reader(File::open(path)?)?))
            },
            None => Ok(Cow::Borrowed(&*ZHANJIANG)),
        }
    }

    fn transform(&mut self, input: Self::Input) -> Result<Self::Output> {
        let mut view = RailMapView::new(
            &input,
            &StyleConfig::DEFAULT,
            &self.user_config.tile_url,
            &self.user_config.attribution,
        );
        view.resolve_surface(RaqoteSurface::acquire(self.user_config));
        if let Some(placeholder) = view.placeholder() {
            return Err(placeholder.into());
        }

        for event in &self.user_config.events {
            view.handle(event);
        }
        view.render()?;

        let overlay = view.overlay().to_string();
        let target = view.into_surface()
            .ok_or("Rendering surface went away")?
            .into_draw_target();
        Ok(RenderedMap {
            target,
            overlay,
        })
    }

    fn load(&mut self, dir: &Path, output: Self::Output) -> Result<()> {
        fs::write(Self::overlay_path(dir), output.overlay)?;
        output.target.write_png(
            Self::output_path(dir)
        ).map_err(|_| "Couldn't write png. (encoding error)".into())
    }
}
