use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use crate::config::{Config, ConfigData};
use crate::data::{CsvLoader, DataFrame};
use crate::panels::{tab_body, tab_fiducial};
use crate::visualization::layouts::SizingMode;
use crate::visualization::tabs::{TabPanel, Tabs};
use crate::visualization::timing::{TimingChartBuilder, UpdateTimingChart};

pub const BODY_STATE_PREFIX: &str = "body_state";
pub const BODY_TRUTH_PREFIX: &str = "body_truth";
pub const FIDUCIAL_PREFIX: &str = "fiducial";

/// Collects every tab of the evaluation dashboard.
pub struct DashboardBuilder {
    sensors: ConfigData,
    timing: Box<dyn TimingChartBuilder>,
}

impl DashboardBuilder {
    pub fn new(sensors: ConfigData, timing: Box<dyn TimingChartBuilder>) -> Self {
        Self { sensors, timing }
    }

    pub fn from_config(config: &Config) -> Self {
        let timing = UpdateTimingChart::new(config.plot.histogram_bins);
        Self::new(config.sensors.clone(), Box::new(timing))
    }

    /// Load every run directory and build the dashboard from it.
    pub fn build<P: AsRef<Path>>(&self, data_dirs: &[P]) -> anyhow::Result<Tabs> {
        let body_state = CsvLoader::find_and_read_data_frames(data_dirs, BODY_STATE_PREFIX)
            .context("Failed to read body state data")?;
        let body_truth = CsvLoader::find_and_read_data_frames(data_dirs, BODY_TRUTH_PREFIX)
            .context("Failed to read body truth data")?;
        let fiducials = CsvLoader::find_and_read_data_frames(data_dirs, FIDUCIAL_PREFIX)
            .context("Failed to read fiducial data")?;

        Ok(self.build_from_frames(&body_state, &body_truth, &fiducials))
    }

    /// Build the dashboard from already loaded frame groups.
    ///
    /// A tab that cannot be assembled is left out; the rest of the
    /// dashboard is still built.
    pub fn build_from_frames(
        &self,
        body_state: &BTreeMap<u32, Vec<DataFrame>>,
        body_truth: &BTreeMap<u32, Vec<DataFrame>>,
        fiducials: &BTreeMap<u32, Vec<DataFrame>>,
    ) -> Tabs {
        let mut tabs: Vec<TabPanel> = Vec::new();

        for (key, state) in body_state {
            let truth = body_truth.get(key).map(Vec::as_slice).unwrap_or_default();
            tabs.push(tab_body(state, truth));
        }

        for (key, datasets) in fiducials {
            match tab_fiducial(datasets, &self.sensors, *key, self.timing.as_ref()) {
                Ok(tab) => tabs.push(tab),
                Err(e) => log::warn!("Skipping fiducial tab {}: {}", key, e),
            }
        }

        log::info!("Built dashboard with {} tabs", tabs.len());
        Tabs::new(tabs, SizingMode::StretchWidth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualization::charts::Glyph;
    use crate::visualization::timing::DURATION_COLUMN;
    use std::fs;

    fn fiducial(id: u32, durations: Vec<f64>) -> DataFrame {
        DataFrame::new()
            .with_column(DURATION_COLUMN, durations)
            .with_attr("prefix", "Fiducial")
            .with_attr("id", id)
    }

    #[test]
    fn test_skips_failed_fiducial_tabs() {
        let mut fiducials = BTreeMap::new();
        fiducials.insert(2, vec![fiducial(2, vec![1e6, 2e6])]);
        fiducials.insert(3, vec![DataFrame::new().with_attr("id", 3u32)]);
        fiducials.insert(1, vec![fiducial(1, vec![5e6])]);

        let builder = DashboardBuilder::from_config(&Config::default());
        let tabs = builder.build_from_frames(&BTreeMap::new(), &BTreeMap::new(), &fiducials);

        assert_eq!(tabs.titles(), vec!["Fiducial 1", "Fiducial 2"]);
        assert_eq!(tabs.sizing_mode, SizingMode::StretchWidth);
    }

    #[test]
    fn test_body_tab_comes_first() {
        let mut body_state = BTreeMap::new();
        body_state.insert(0, vec![DataFrame::new()]);
        let mut fiducials = BTreeMap::new();
        fiducials.insert(4, vec![fiducial(4, vec![1e6])]);

        let builder = DashboardBuilder::from_config(&Config::default());
        let tabs = builder.build_from_frames(&body_state, &BTreeMap::new(), &fiducials);

        assert_eq!(tabs.titles(), vec!["Body", "Fiducial 4"]);
    }

    #[test]
    fn test_fiducial_timing_has_no_rate_line() {
        // Fiducial ids and sensor ids are separate numberings.
        let mut config = Config::default();
        config.sensors.camera_rates.insert("2".to_string(), 50.0);
        config.sensors.imu_rates.insert("2".to_string(), 400.0);

        let mut fiducials = BTreeMap::new();
        fiducials.insert(2, vec![fiducial(2, vec![1e6, 30e6])]);

        let tabs = DashboardBuilder::from_config(&config).build_from_frames(
            &BTreeMap::new(),
            &BTreeMap::new(),
            &fiducials,
        );

        let timing = tabs.tabs[0].child.rows[2][0].as_chart().unwrap();
        assert!(matches!(&timing.glyphs[..], [Glyph::Quad { .. }]));
    }

    #[test]
    fn test_build_from_directories() {
        let run = tempfile::tempdir().unwrap();
        fs::write(run.path().join("fiducial_5.csv"), "time,duration_0\n0.0,1000000\n0.1,3000000\n").unwrap();
        fs::write(run.path().join("body_state.csv"), "time,pos_0\n0.0,1.0\n").unwrap();

        let builder = DashboardBuilder::from_config(&Config::default());
        let tabs = builder.build(&[run.path()]).unwrap();

        assert_eq!(tabs.titles(), vec!["Body", "Fiducial 5"]);
        let timing = tabs.tabs[1].child.rows[2][0].as_chart().unwrap();
        assert_eq!(timing.title.as_deref(), Some("Fiducial 5 Update Time"));
    }

    #[test]
    fn test_build_reports_bad_files() {
        let run = tempfile::tempdir().unwrap();
        fs::write(run.path().join("fiducial_1.csv"), "duration_0\nnot-a-number\n").unwrap();

        let builder = DashboardBuilder::from_config(&Config::default());
        let err = builder.build(&[run.path()]).unwrap_err();
        assert!(err.to_string().contains("fiducial"));
    }
}
