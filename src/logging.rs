use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Send `tracing` output to `path`; the terminal belongs to the TUI.
/// `RUST_LOG` overrides the default `info` level.
pub fn init(path: &Path) -> Result<(), Box<dyn Error + Send + Sync>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state").join("dopers.log");

        init(&path).unwrap();
        tracing::warn!("log file smoke test");

        assert!(path.exists());
        // A second global subscriber is refused
        assert!(init(&path).is_err());
    }
}
