use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::visualization::layouts::{GridLayout, SizingMode};

/// One named view of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabPanel {
    pub title: String,
    pub child: GridLayout,
}

impl TabPanel {
    pub fn new(title: impl Into<String>, child: GridLayout) -> Self {
        Self {
            title: title.into(),
            child,
        }
    }
}

/// The tab-of-tabs shown (or saved) as a whole dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Tabs {
    pub tabs: Vec<TabPanel>,
    pub sizing_mode: SizingMode,
}

impl Tabs {
    pub fn new(tabs: Vec<TabPanel>, sizing_mode: SizingMode) -> Self {
        Self { tabs, sizing_mode }
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tabs.iter().map(|tab| tab.title.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn export_json(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        log::info!("Saved {} tabs to {}", self.tabs.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualization::charts::ChartWidget;
    use crate::visualization::layouts::Cell;

    #[test]
    fn test_json_shape() {
        let grid = GridLayout::new(
            vec![vec![ChartWidget::placeholder(600, 200).into(), Cell::Spacer]],
            SizingMode::StretchWidth,
        );
        let tabs = Tabs::new(vec![TabPanel::new("Body", grid)], SizingMode::StretchWidth);

        let value: serde_json::Value = serde_json::from_str(&tabs.to_json().unwrap()).unwrap();
        assert_eq!(value["tabs"][0]["title"], "Body");
        assert_eq!(value["sizing_mode"], "stretch_width");
        let row = &value["tabs"][0]["child"]["rows"][0];
        assert_eq!(row[0]["type"], "chart");
        assert_eq!(row[0]["glyphs"][0]["type"], "scatter");
        assert_eq!(row[1]["type"], "spacer");
    }

    #[test]
    fn test_export_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots.json");
        let tabs = Tabs::default();

        tabs.export_json(&path).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("\"tabs\": []"));
        assert!(tabs.is_empty());
    }
}
