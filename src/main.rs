mod data;
mod errors;
mod etl;
mod map;
mod selection;
mod surface;

use std::env;
use std::fs::{create_dir_all, File};
use std::io;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;
use structured_logger::json::new_writer;
use structured_logger::Builder;

use crate::errors::Result;
use crate::etl::draw_map::{DrawMapEtl, Theme};
use crate::etl::Etl;
use crate::map::InteractionEvent;
use crate::surface::{DEFAULT_ATTRIBUTION, DEFAULT_TILE_URL};

const DEFAULT_CONFIG_PATH: &str = "config/zhanjiang.json";

#[derive(Deserialize)]
pub struct UserConfig {
    pub dest_path: String,
    /// Alternative network file; the built-in Zhanjiang network is used when absent.
    #[serde(default)]
    pub network_path: Option<String>,
    #[serde(default)]
    pub font_path: Option<String>,
    pub top_left_lon: f64,
    pub top_left_lat: f64,
    pub px_per_deg_lon: f64,
    pub px_per_deg_lat: f64,
    pub width_px: u64,
    pub height_px: u64,
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    #[serde(default = "default_attribution")]
    pub attribution: String,
    pub theme: Theme,
    #[serde(default)]
    pub events: Vec<InteractionEvent>,
}

fn default_tile_url() -> String {
    DEFAULT_TILE_URL.to_string()
}

fn default_attribution() -> String {
    DEFAULT_ATTRIBUTION.to_string()
}

fn load_user_config(path: &str) -> Result<UserConfig> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

fn create_output_dir(config: &UserConfig) -> Result<PathBuf> {
    let output_dir = Path::new(&config.dest_path).to_path_buf();
    create_dir_all(&output_dir)?;
    Ok(output_dir)
}

fn setup_logging() {
    Builder::with_level("info")
        .with_target_writer("*", new_writer(io::stdout()))
        .init();
}

fn main() -> Result<()> {
    setup_logging();

    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    info!(config_path = config_path.as_str(); "Loading configuration");
    let user_config = load_user_config(&config_path)?;
    let output_dir = create_output_dir(&user_config)?;

    let mut etl = DrawMapEtl::new(&user_config);
    etl.clean(&output_dir)?;
    etl.process(&output_dir)?;

    Ok(())
}
