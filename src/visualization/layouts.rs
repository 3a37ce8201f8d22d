use ratatui::prelude::*;
use serde::Serialize;

use crate::visualization::charts::ChartWidget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingMode {
    Fixed,
    #[default]
    StretchWidth,
    StretchBoth,
}

/// A grid slot: a chart or a blank spacer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    Chart(ChartWidget),
    Spacer,
}

impl Cell {
    pub fn as_chart(&self) -> Option<&ChartWidget> {
        match self {
            Cell::Chart(chart) => Some(chart),
            Cell::Spacer => None,
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, Cell::Spacer)
    }
}

impl From<ChartWidget> for Cell {
    fn from(chart: ChartWidget) -> Self {
        Cell::Chart(chart)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLayout {
    pub rows: Vec<Vec<Cell>>,
    pub sizing_mode: SizingMode,
}

impl GridLayout {
    pub fn new(rows: Vec<Vec<Cell>>, sizing_mode: SizingMode) -> Self {
        Self { rows, sizing_mode }
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartWidget> {
        self.rows.iter().flatten().filter_map(Cell::as_chart)
    }

    /// Splits `area` into one horizontal band per row and one cell per
    /// widget. Rows share the height equally, except under `Fixed` sizing
    /// where both directions follow the chart dimensions.
    pub fn create_layout(&self, area: Rect) -> Vec<Vec<Rect>> {
        if self.rows.is_empty() {
            return Vec::new();
        }

        let row_constraints: Vec<Constraint> = match self.sizing_mode {
            SizingMode::Fixed => self
                .rows
                .iter()
                .map(|row| Constraint::Ratio(row_height(row).max(1), total_height(&self.rows).max(1)))
                .collect(),
            SizingMode::StretchWidth | SizingMode::StretchBoth => self
                .rows
                .iter()
                .map(|_| Constraint::Ratio(1, self.rows.len() as u32))
                .collect(),
        };

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(row_constraints)
            .split(area);

        self.rows
            .iter()
            .zip(row_areas.iter())
            .map(|(row, row_area)| {
                if row.is_empty() {
                    return Vec::new();
                }
                let constraints = self.column_constraints(row);
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(constraints)
                    .split(*row_area)
                    .to_vec()
            })
            .collect()
    }

    fn column_constraints(&self, row: &[Cell]) -> Vec<Constraint> {
        match self.sizing_mode {
            SizingMode::Fixed => {
                let total: u32 = row.iter().map(cell_width).sum();
                row.iter()
                    .map(|cell| Constraint::Ratio(cell_width(cell).max(1), total.max(1)))
                    .collect()
            }
            SizingMode::StretchWidth | SizingMode::StretchBoth => row
                .iter()
                .map(|_| Constraint::Ratio(1, row.len() as u32))
                .collect(),
        }
    }

    pub fn render(&self, area: Rect, frame: &mut Frame) {
        let areas = self.create_layout(area);
        for (row, row_areas) in self.rows.iter().zip(areas) {
            for (cell, cell_area) in row.iter().zip(row_areas) {
                if let Cell::Chart(chart) = cell {
                    chart.render(cell_area, frame);
                }
            }
        }
    }
}

// Spacers take the space a default-sized chart would.
const SPACER_WIDTH: u32 = 600;

fn cell_width(cell: &Cell) -> u32 {
    cell.as_chart().map(|c| c.width as u32).unwrap_or(SPACER_WIDTH)
}

fn row_height(row: &[Cell]) -> u32 {
    row.iter()
        .filter_map(Cell::as_chart)
        .map(|c| c.height as u32)
        .max()
        .unwrap_or(0)
}

fn total_height(rows: &[Vec<Cell>]) -> u32 {
    rows.iter().map(|row| row_height(row).max(1)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(sizing_mode: SizingMode) -> GridLayout {
        GridLayout::new(
            vec![
                vec![ChartWidget::new(600, 200).into(), ChartWidget::new(600, 200).into()],
                vec![ChartWidget::new(800, 300).into(), Cell::Spacer],
            ],
            sizing_mode,
        )
    }

    #[test]
    fn test_stretch_layout() {
        let area = Rect::new(0, 0, 100, 30);
        let layout = grid(SizingMode::StretchWidth).create_layout(area);

        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].len(), 2);
        assert_eq!(layout[0][0].width, 50);
        assert_eq!(layout[0][0].height, 15);
        assert_eq!(layout[1][1].x, 50);
    }

    #[test]
    fn test_fixed_layout_follows_chart_sizes() {
        let area = Rect::new(0, 0, 140, 50);
        let layout = grid(SizingMode::Fixed).create_layout(area);

        // 800:600 split on the second row, 200:300 split between rows.
        assert_eq!(layout[1][0].width, 80);
        assert_eq!(layout[0][0].height, 20);
        assert_eq!(layout[1][0].height, 30);
    }

    #[test]
    fn test_charts_skip_spacers() {
        let layout = grid(SizingMode::StretchWidth);
        assert_eq!(layout.charts().count(), 3);
        assert!(layout.rows[1][1].is_spacer());
        assert!(GridLayout::new(Vec::new(), SizingMode::Fixed)
            .create_layout(Rect::new(0, 0, 10, 10))
            .is_empty());
    }
}
