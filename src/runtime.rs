use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};

use crate::{error::LoadError, record::RaceResult};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum PlotEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
    /// Outcome of the one-shot dataset fetch
    Loaded(Result<Vec<RaceResult>, LoadError>),
}

/// Source of terminal events (keyboard, mouse, resize) and fetch results
pub trait PlotEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<PlotEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<PlotEvent>,
    tx: Sender<PlotEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => PlotEvent::Key(key),
                Ok(CtEvent::Mouse(mouse)) => PlotEvent::Mouse(mouse),
                Ok(CtEvent::Resize(_, _)) => PlotEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if input_tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx, tx }
    }

    /// Handle for background work (the dataset fetch) to post events
    pub fn sender(&self) -> Sender<PlotEvent> {
        self.tx.clone()
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PlotEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<PlotEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<PlotEvent>) -> Self {
        Self { rx }
    }
}

impl PlotEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<PlotEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: PlotEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: PlotEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to tick interval and returns the next event, or Tick on timeout
    pub fn step(&self) -> PlotEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => PlotEvent::Tick,
        }
    }
}
