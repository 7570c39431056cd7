use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

use crate::{geometry::PlotGeometry, loader::DEFAULT_SOURCE_URL};

/// A zero tick would spin the event loop
pub const MIN_TICK_RATE_MS: u64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub source_url: String,
    pub tick_rate_ms: u64,
    pub tooltip_offset: f64,
    pub dot_radius: f64,
}

impl Default for Config {
    fn default() -> Self {
        let geometry = PlotGeometry::default();
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            tick_rate_ms: 250,
            tooltip_offset: geometry.tooltip_offset,
            dot_radius: geometry.dot_radius,
        }
    }
}

impl Config {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(MIN_TICK_RATE_MS))
    }

    pub fn geometry(&self) -> PlotGeometry {
        PlotGeometry {
            tooltip_offset: self.tooltip_offset,
            dot_radius: self.dot_radius,
            ..PlotGeometry::default()
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "dopers") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("dopers_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let Ok(bytes) = fs::read(&self.path) else {
            return Config::default();
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            source_url: "http://localhost:8000/cyclists.json".into(),
            tick_rate_ms: 50,
            tooltip_offset: 12.0,
            dot_radius: 8.0,
        };
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_or_corrupt_config_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), Config::default());

        fs::write(&path, b"{ not json").unwrap();
        assert_eq!(store.load(), Config::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"tick_rate_ms": 40}"#).unwrap();

        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.tick_rate_ms, 40);
        assert_eq!(loaded.source_url, DEFAULT_SOURCE_URL);
    }

    #[test]
    fn saved_config_holds_only_user_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        FileConfigStore::with_path(&path)
            .save(&Config::default())
            .unwrap();

        let saved: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        let mut keys: Vec<&str> = saved
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["dot_radius", "source_url", "tick_rate_ms", "tooltip_offset"]);
    }

    #[test]
    fn stored_zero_tick_rate_is_clamped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{"tick_rate_ms": 0}"#).unwrap();

        let loaded = FileConfigStore::with_path(&path).load();
        assert_eq!(loaded.tick_rate(), Duration::from_millis(MIN_TICK_RATE_MS));
        assert_eq!(Config::default().tick_rate(), Duration::from_millis(250));
    }

    #[test]
    fn geometry_uses_configured_marker_settings() {
        let cfg = Config {
            dot_radius: 9.0,
            tooltip_offset: 10.0,
            ..Config::default()
        };
        let g = cfg.geometry();
        assert_eq!(g.dot_radius, 9.0);
        assert_eq!(g.tooltip_offset, 10.0);
        assert_eq!(g.width, 900.0);
    }
}
