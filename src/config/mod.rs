pub mod settings;

pub use settings::{Config, ConfigData, PlotConfig, UiConfig};
