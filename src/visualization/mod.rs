pub mod charts;
pub mod layouts;
pub mod tabs;
pub mod timing;

pub use charts::{ChartWidget, Glyph, GlyphColor};
pub use layouts::{Cell, GridLayout, SizingMode};
pub use tabs::{TabPanel, Tabs};
pub use timing::{TimingChartBuilder, UpdateTimingChart};
