use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use reqwest::header::ACCEPT;
use tracing::{debug, error, info};

use crate::{error::LoadError, record::RaceResult, runtime::PlotEvent};

pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/cyclist-data.json";

/// Where the raw race results come from
pub trait DataSource: Send + 'static {
    /// Single attempt; no retry, no partial results
    fn fetch_results(&self) -> Result<Vec<RaceResult>, LoadError>;

    /// Human readable origin, for logs
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    use_proxy: bool,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            use_proxy: true,
        }
    }

    /// Ignore HTTP(S)_PROXY from the environment
    pub fn without_proxy(mut self) -> Self {
        self.use_proxy = false;
        self
    }
}

impl DataSource for HttpSource {
    fn fetch_results(&self) -> Result<Vec<RaceResult>, LoadError> {
        let request_failed = |e: reqwest::Error| LoadError::Request {
            url: self.url.clone(),
            reason: e.to_string(),
        };

        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!("dopers/", env!("CARGO_PKG_VERSION")));
        if !self.use_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().map_err(request_failed)?;

        let response = client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response.json::<Vec<RaceResult>>().map_err(|e| {
            if e.is_decode() {
                LoadError::Payload(e.to_string())
            } else {
                request_failed(e)
            }
        })
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the same JSON array from disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl DataSource for FileSource {
    fn fetch_results(&self) -> Result<Vec<RaceResult>, LoadError> {
        let bytes = fs::read(&self.path).map_err(|e| LoadError::Io {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_slice(&bytes).map_err(|e| LoadError::Payload(e.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetch once on a background thread and post the outcome as a
/// [`PlotEvent::Loaded`]. A closed channel means the view is gone; the
/// result is dropped.
pub fn spawn_fetch<S: DataSource>(source: S, tx: Sender<PlotEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        let origin = source.describe();
        info!(%origin, "fetching race results");

        let result = source.fetch_results();
        match &result {
            Ok(rows) => info!(%origin, count = rows.len(), "fetch finished"),
            Err(err) => error!(%origin, %err, "fetch failed"),
        }

        if tx.send(PlotEvent::Loaded(result)).is_err() {
            debug!("view closed before the fetch finished, discarding result");
        }
    })
}
