use crate::data::DataFrame;
use crate::error::ComputationError;
use crate::visualization::charts::{ChartWidget, GlyphColor};

pub const DURATION_COLUMN: &str = "duration_0";
const NANOS_PER_MILLI: f64 = 1e6;

/// Builds the derived timing chart placed in a tab's last row.
pub trait TimingChartBuilder: Send + Sync {
    fn build(&self, datasets: &[DataFrame]) -> Result<ChartWidget, ComputationError>;
}

/// Histogram of update execution durations across every run of a sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTimingChart {
    pub rate: Option<f64>,
    pub bins: usize,
}

impl Default for UpdateTimingChart {
    fn default() -> Self {
        Self { rate: None, bins: 10 }
    }
}

impl UpdateTimingChart {
    pub fn new(bins: usize) -> Self {
        Self {
            bins: bins.max(1),
            ..Self::default()
        }
    }

    /// Adds a reference line at the longest update the sensor rate allows.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }
}

impl TimingChartBuilder for UpdateTimingChart {
    fn build(&self, datasets: &[DataFrame]) -> Result<ChartWidget, ComputationError> {
        let first = datasets
            .first()
            .ok_or_else(|| ComputationError::NoData("update timing".to_string()))?;
        let prefix = first
            .attr("prefix")
            .ok_or_else(|| ComputationError::MissingAttribute("prefix".to_string()))?;
        let id = first
            .attr("id")
            .ok_or_else(|| ComputationError::MissingAttribute("id".to_string()))?;

        let mut durations = Vec::new();
        for df in datasets {
            let column = df
                .column(DURATION_COLUMN)
                .ok_or_else(|| ComputationError::MissingColumn(DURATION_COLUMN.to_string()))?;
            durations.extend(column.iter().map(|d| d / NANOS_PER_MILLI));
        }

        let (counts, edges) = histogram(&durations, self.bins)
            .ok_or_else(|| ComputationError::NoData(DURATION_COLUMN.to_string()))?;

        let mut chart = ChartWidget::new(800, 300)
            .with_title(format!("{} {} Update Time", prefix, id))
            .with_axis_labels("time [s]", "Count");
        chart.quad(
            counts.iter().map(|&c| c as f64).collect(),
            0.0,
            edges[..edges.len() - 1].to_vec(),
            edges[1..].to_vec(),
            "Duration [ms]",
        );

        if let Some(rate) = self.rate {
            if rate <= 0.0 || !rate.is_finite() {
                return Err(ComputationError::InvalidRate(rate));
            }
            chart.vline(1000.0 / rate, GlyphColor::Red);
        }

        log::debug!(
            "Update timing for {} {}: {} samples in {} bins",
            prefix,
            id,
            durations.len(),
            counts.len()
        );
        Ok(chart)
    }
}

/// Equal-width histogram over `[min, max]`, the last bin closed.
///
/// Returns `(counts, edges)` with `edges.len() == counts.len() + 1`, or
/// `None` when there are no finite values.
pub fn histogram(values: &[f64], bins: usize) -> Option<(Vec<usize>, Vec<f64>)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return None;
    }

    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for value in finite {
        let index = (((value - min) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    Some((counts, edges))
}
