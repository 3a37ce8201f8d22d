use crate::data::DataFrame;
use crate::visualization::charts::ChartWidget;
use crate::visualization::layouts::{GridLayout, SizingMode};
use crate::visualization::tabs::TabPanel;

use super::fiducial::{CHART_HEIGHT, CHART_WIDTH};

/// Body state tab: four stacked charts.
pub fn tab_body(state: &[DataFrame], truth: &[DataFrame]) -> TabPanel {
    let rows = (0..4)
        .map(|_| vec![ChartWidget::placeholder(CHART_WIDTH, CHART_HEIGHT).into()])
        .collect();

    log::debug!("Assembled body tab ({} state runs, {} truth runs)", state.len(), truth.len());
    TabPanel::new("Body", GridLayout::new(rows, SizingMode::StretchWidth))
}
