use serde::Deserialize;

/// Suffix marking an unverified or approximate waypoint in a route path.
pub const UNVERIFIED_MARKER: &str = " (x)";

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(from = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl From<[f64; 2]> for Coordinate {
    fn from(value: [f64; 2]) -> Self {
        Coordinate {
            lat: value[0],
            lon: value[1],
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Station {
    pub name: String,
    #[serde(rename = "coordinates")]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Station {
    /// Name as shown next to the marker: registry keys use underscores for spaces.
    pub fn label(&self) -> String {
        self.name.replace('_', " ")
    }
}

/// Maps a path entry onto a registry key. " (x)" is dropped from the end, then
/// spaces become underscores.
pub fn normalize_station_name(name: &str) -> String {
    name.strip_suffix(UNVERIFIED_MARKER)
        .unwrap_or(name)
        .replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_unverified_marker() {
        assert_eq!(normalize_station_name("湛江站 (x)"), "湛江站");
        assert_eq!(normalize_station_name("湛江站"), "湛江站");
    }

    #[test]
    fn replaces_spaces() {
        assert_eq!(normalize_station_name("Hai An (x)"), "Hai_An");
        assert_eq!(normalize_station_name("Hai An South"), "Hai_An_South");
    }

    #[test]
    fn marker_only_stripped_at_end() {
        assert_eq!(normalize_station_name("A (x) B"), "A_(x)_B");
    }

    #[test]
    fn normalization_is_idempotent() {
        for name in ["湛江站 (x)", "Hai An (x)", "A (x) (x)", "plain", " (x)", "", "a  b"] {
            let once = normalize_station_name(name);
            assert_eq!(normalize_station_name(&once), once, "input {name:?}");
        }
    }

    #[test]
    fn label_restores_spaces() {
        let station = Station {
            name: "Hai_An_South".to_string(),
            coordinate: Coordinate { lat: 20.26, lon: 110.21 },
            address: None,
            phone: None,
        };
        assert_eq!(station.label(), "Hai An South");
    }

    #[test]
    fn deserializes_coordinate_pair() {
        let station: Station = serde_json::from_str(
            r#"{"name": "徐闻站", "coordinates": [20.352062, 110.151946]}"#
        ).unwrap();
        assert_eq!(station.coordinate, Coordinate { lat: 20.352062, lon: 110.151946 });
        assert_eq!(station.address, None);
    }
}
