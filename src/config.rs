use std::fs;

use directories::ProjectDirs;
use serde::Deserialize;

pub const DEFAULT_TOTAL_FILE: &str = "ec2_cost_data_daily_total.json";
pub const DEFAULT_GROUPED_FILE: &str = "ec2_cost_data_per_instance_type.json";
pub const DEFAULT_CHART_WIDTH: u32 = 1000;
pub const DEFAULT_CHART_HEIGHT: u32 = 600;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    pub total_file: Option<String>,
    pub grouped_file: Option<String>,
    pub chart_width: Option<u32>,
    pub chart_height: Option<u32>,
}

pub fn load_config() -> Config {
    let Some(dirs) = ProjectDirs::from("", "", "cereport") else {
        return Config::default();
    };

    let path = dirs.config_dir().join("config.toml");
    let Ok(data) = fs::read_to_string(&path) else {
        return Config::default();
    };

    match toml::from_str(&data) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: invalid config at {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// CLI flag wins over config file, config file over the built-in default.
pub fn resolve_name(cli: Option<String>, config: Option<String>, default: &str) -> String {
    cli.or(config).unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn chart_size(&self) -> (u32, u32) {
        (
            self.chart_width.unwrap_or(DEFAULT_CHART_WIDTH),
            self.chart_height.unwrap_or(DEFAULT_CHART_HEIGHT),
        )
    }
}
