use ratatui::{
    prelude::*,
    widgets::{Axis, BarChart, Block, Borders, Chart, Dataset, GraphType},
    symbols,
    style::{Color, Style},
};
use serde::Serialize;

use crate::utils::formatting::format_millis;

pub const PLACEHOLDER_X: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
pub const PLACEHOLDER_Y: [f64; 5] = [6.0, 7.0, 2.0, 4.0, 5.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphColor {
    Navy,
    Red,
    SteelBlue,
}

impl GlyphColor {
    fn to_tui(self) -> Color {
        match self {
            GlyphColor::Navy => Color::Blue,
            GlyphColor::Red => Color::Red,
            GlyphColor::SteelBlue => Color::Cyan,
        }
    }
}

/// A plotted primitive owned by a [`ChartWidget`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Glyph {
    Scatter {
        xs: Vec<f64>,
        ys: Vec<f64>,
        size: f64,
        color: GlyphColor,
        alpha: f64,
    },
    /// Histogram bars, one per `(left, right, top)` triple, all from `bottom`.
    Quad {
        top: Vec<f64>,
        bottom: f64,
        left: Vec<f64>,
        right: Vec<f64>,
        legend: String,
    },
    VLine {
        x: f64,
        color: GlyphColor,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartWidget {
    pub width: u16,
    pub height: u16,
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub glyphs: Vec<Glyph>,
}

impl ChartWidget {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            title: None,
            x_label: None,
            y_label: None,
            glyphs: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_axis_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    pub fn circle(&mut self, xs: &[f64], ys: &[f64], size: f64, color: GlyphColor, alpha: f64) {
        self.glyphs.push(Glyph::Scatter {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            size,
            color,
            alpha,
        });
    }

    pub fn quad(&mut self, top: Vec<f64>, bottom: f64, left: Vec<f64>, right: Vec<f64>, legend: &str) {
        self.glyphs.push(Glyph::Quad {
            top,
            bottom,
            left,
            right,
            legend: legend.to_string(),
        });
    }

    pub fn vline(&mut self, x: f64, color: GlyphColor) {
        self.glyphs.push(Glyph::VLine { x, color });
    }

    /// Demo scatter used by tabs whose real series are not plotted yet.
    pub fn placeholder(width: u16, height: u16) -> Self {
        let mut chart = Self::new(width, height);
        chart.circle(&PLACEHOLDER_X, &PLACEHOLDER_Y, 20.0, GlyphColor::Navy, 0.5);
        chart
    }

    pub fn render(&self, area: Rect, frame: &mut Frame) {
        let has_quads = self.glyphs.iter().any(|g| matches!(g, Glyph::Quad { .. }));
        if has_quads {
            self.render_histogram(area, frame);
        } else {
            self.render_xy(area, frame);
        }
    }

    fn block(&self, extra: Option<String>) -> Block<'static> {
        let mut title = self.title.clone().unwrap_or_default();
        if let Some(extra) = extra {
            if !title.is_empty() {
                title.push_str(" | ");
            }
            title.push_str(&extra);
        }

        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
    }

    fn render_histogram(&self, area: Rect, frame: &mut Frame) {
        // BarChart has no x axis, so reference lines go into the title.
        let limits: Vec<String> = self
            .glyphs
            .iter()
            .filter_map(|g| match g {
                Glyph::VLine { x, .. } => Some(format!("limit {}", format_millis(*x))),
                _ => None,
            })
            .collect();
        let extra = if limits.is_empty() { None } else { Some(limits.join(", ")) };

        let mut labels = Vec::new();
        let mut values = Vec::new();
        for glyph in &self.glyphs {
            if let Glyph::Quad { top, left, .. } = glyph {
                for (height, edge) in top.iter().zip(left) {
                    labels.push(format!("{:.2}", edge));
                    values.push(height.max(0.0).round() as u64);
                }
            }
        }
        let data: Vec<(&str, u64)> = labels
            .iter()
            .map(|label| label.as_str())
            .zip(values)
            .collect();

        let bar_count = u16::try_from(data.len()).unwrap_or(u16::MAX).max(1);
        let bar_width = (area.width.saturating_sub(2) / bar_count).saturating_sub(1).clamp(1, 9);

        let chart = BarChart::default()
            .block(self.block(extra))
            .data(&data)
            .bar_width(bar_width)
            .bar_style(Style::default().fg(GlyphColor::SteelBlue.to_tui()))
            .value_style(Style::default().fg(Color::Black).bg(GlyphColor::SteelBlue.to_tui()));

        frame.render_widget(chart, area);
    }

    fn render_xy(&self, area: Rect, frame: &mut Frame) {
        let (x_bounds, y_bounds) = self.bounds();

        // Collect all points first so the datasets can borrow them.
        let series: Vec<(Color, GraphType, Vec<(f64, f64)>)> = self
            .glyphs
            .iter()
            .filter_map(|glyph| match glyph {
                Glyph::Scatter { xs, ys, color, .. } => Some((
                    color.to_tui(),
                    GraphType::Scatter,
                    xs.iter().copied().zip(ys.iter().copied()).collect(),
                )),
                Glyph::VLine { x, color } => Some((
                    color.to_tui(),
                    GraphType::Line,
                    vec![(*x, y_bounds[0]), (*x, y_bounds[1])],
                )),
                Glyph::Quad { .. } => None,
            })
            .collect();

        let datasets: Vec<Dataset> = series
            .iter()
            .map(|(color, graph_type, points)| {
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .style(Style::default().fg(*color))
                    .graph_type(*graph_type)
                    .data(points)
            })
            .collect();

        let chart = Chart::new(datasets)
            .block(self.block(None))
            .x_axis(
                Axis::default()
                    .title(self.x_label.clone().unwrap_or_default())
                    .style(Style::default().fg(Color::Gray))
                    .bounds(x_bounds)
                    .labels(vec![
                        format!("{:.1}", x_bounds[0]).into(),
                        format!("{:.1}", x_bounds[1]).into(),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title(self.y_label.clone().unwrap_or_default())
                    .style(Style::default().fg(Color::Gray))
                    .bounds(y_bounds)
                    .labels(vec![
                        format!("{:.1}", y_bounds[0]).into(),
                        format!("{:.1}", y_bounds[1]).into(),
                    ]),
            );

        frame.render_widget(chart, area);
    }

    /// Data bounds padded by one unit, `[0, 1]` on an axis with no data.
    fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        for glyph in &self.glyphs {
            match glyph {
                Glyph::Scatter { xs: gx, ys: gy, .. } => {
                    xs.extend_from_slice(gx);
                    ys.extend_from_slice(gy);
                }
                Glyph::VLine { x, .. } => xs.push(*x),
                Glyph::Quad { .. } => {}
            }
        }

        (padded_range(&xs), padded_range(&ys))
    }
}

fn padded_range(values: &[f64]) -> [f64; 2] {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min.is_finite() && max.is_finite() {
        [min - 1.0, max + 1.0]
    } else {
        [0.0, 1.0]
    }
}
