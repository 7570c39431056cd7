// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod geometry;
pub mod hover;
pub mod loader;
pub mod logging;
pub mod plot;
pub mod record;
pub mod runtime;
pub mod scale;
pub mod ui;
pub mod view;

pub use app::App;
