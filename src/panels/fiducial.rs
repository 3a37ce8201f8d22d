use crate::config::ConfigData;
use crate::data::DataFrame;
use crate::error::PanelError;
use crate::visualization::charts::ChartWidget;
use crate::visualization::layouts::{Cell, GridLayout, SizingMode};
use crate::visualization::tabs::TabPanel;
use crate::visualization::timing::TimingChartBuilder;

pub const CHART_WIDTH: u16 = 600;
pub const CHART_HEIGHT: u16 = 200;

/// Assemble the tab for one fiducial board.
///
/// `datasets` holds one frame per run; the first frame's `id` attribute
/// names the tab. The sensor config and `key` are accepted so every tab builder has
/// the same call shape, but neither changes the result yet.
pub fn tab_fiducial(
    datasets: &[DataFrame],
    _config: &ConfigData,
    key: u32,
    timing: &dyn TimingChartBuilder,
) -> Result<TabPanel, PanelError> {
    let id = datasets
        .first()
        .and_then(|df| df.attr("id"))
        .ok_or_else(|| PanelError::MissingAttribute {
            key: "id".to_string(),
            datasets: datasets.len(),
        })?;

    let p1 = ChartWidget::placeholder(CHART_WIDTH, CHART_HEIGHT);
    let p2 = ChartWidget::placeholder(CHART_WIDTH, CHART_HEIGHT);
    let p3 = ChartWidget::placeholder(CHART_WIDTH, CHART_HEIGHT);
    let p4 = ChartWidget::placeholder(CHART_WIDTH, CHART_HEIGHT);

    let timing_chart = timing.build(datasets)?;

    let layout = GridLayout::new(
        vec![
            vec![p1.into(), p2.into()],
            vec![p3.into(), p4.into()],
            vec![timing_chart.into(), Cell::Spacer],
        ],
        SizingMode::StretchWidth,
    );

    log::debug!("Assembled fiducial tab {} (key {}, {} runs)", id, key, datasets.len());
    Ok(TabPanel::new(format!("Fiducial {}", id), layout))
}
