// Library exports for fiducial-eval
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod panels;
pub mod ui;
pub mod utils;
pub mod visualization;

pub use config::settings;
pub use dashboard::DashboardBuilder;
pub use data::{frame, loader};
pub use error::{ComputationError, ConfigError, DataError, PanelError};
pub use panels::{tab_body, tab_fiducial};
pub use ui::app;
pub use utils::formatting;
pub use visualization::{charts, layouts, tabs, timing};

// Error types
pub use anyhow::{Error, Result};
